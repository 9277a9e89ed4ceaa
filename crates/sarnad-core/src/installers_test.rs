use std::path::Path;

use super::*;

fn installer(nom: &str, localisation: &str, siret: &str) -> Installer {
    Installer {
        nom: nom.to_string(),
        localisation: localisation.to_string(),
        adresse: "1 Rue de la Paix\n75002 Paris".to_string(),
        phone: "01 23 45 67 89".to_string(),
        email: "contact@example.fr".to_string(),
        siret: siret.to_string(),
    }
}

#[test]
fn validate_rejects_empty_name() {
    let err = RecordStore::from_records(vec![installer("  ", "Paris", "111")]).unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn validate_rejects_empty_localisation() {
    let err = RecordStore::from_records(vec![installer("Soleil SARL", "", "111")]).unwrap_err();
    assert!(err.to_string().contains("empty localisation"));
}

#[test]
fn validate_rejects_empty_siret() {
    let err = RecordStore::from_records(vec![installer("Soleil SARL", "Lyon", " ")]).unwrap_err();
    assert!(err.to_string().contains("empty SIRET"));
}

#[test]
fn validate_rejects_duplicate_siret() {
    let err = RecordStore::from_records(vec![
        installer("Soleil SARL", "Paris", "111"),
        installer("Photon Plus", "Lyon", "111"),
    ])
    .unwrap_err();
    assert!(err.to_string().contains("duplicate SIRET"));
}

#[test]
fn validate_accepts_unvalidated_contact_strings() {
    let mut odd = installer("Soleil SARL", "Paris", "111");
    odd.phone = "call me maybe".to_string();
    odd.email = "not-an-email".to_string();
    assert!(RecordStore::from_records(vec![odd]).is_ok());
}

#[test]
fn store_preserves_order_and_looks_up_by_siret() {
    let store = RecordStore::from_records(vec![
        installer("B", "Paris", "2"),
        installer("A", "Lyon", "1"),
    ])
    .unwrap();
    let names: Vec<&str> = store.records().iter().map(|r| r.nom.as_str()).collect();
    assert_eq!(names, ["B", "A"]);
    assert_eq!(store.get("1").map(|r| r.nom.as_str()), Some("A"));
    assert!(store.get("3").is_none());
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
}

#[test]
fn parses_yaml_document() {
    let yaml = r"
installers:
  - nom: Soleil SARL
    localisation: Paris
    adresse: |-
      12 Rue A
      75001 Paris
    phone: 01 00 00 00 00
    email: soleil@example.fr
    siret: '12345678900011'
";
    let file: InstallersFile = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(file.installers.len(), 1);
    assert_eq!(file.installers[0].adresse, "12 Rue A\n75001 Paris");
    assert_eq!(file.installers[0].siret, "12345678900011");
}

#[test]
fn load_installers_reports_missing_file() {
    let err = load_installers(Path::new("/nonexistent/installers.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::InstallersFileIo { .. }));
}

#[test]
fn load_installers_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("installers.yaml");
    assert!(
        path.exists(),
        "installers.yaml missing at {path:?}; required for this test"
    );
    let result = load_installers(&path);
    assert!(result.is_ok(), "failed to load installers.yaml: {result:?}");
    assert!(!result.unwrap().is_empty());
}
