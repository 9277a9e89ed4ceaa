//! Terminal rendering of a session view.
//!
//! Pure: a [`Frame`] is built from a [`View`] plus a copy-flag lookup and
//! only formats them. Styling goes through `colored`, which drops escape
//! codes when stdout is not a terminal or `NO_COLOR` is set.

use std::fmt;

use colored::{Color, ColoredString, Colorize};
use sarnad_core::{
    mailto_link, search_placeholder, tel_link, CopyField, Installer, SearchField, Theme, View,
    DISPLAY_CAP,
};

const NO_RESULTS: &str = "Aucun installateur trouvé pour votre recherche.";
const COPIED: &str = "✓ copié";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    title: Color,
    text: Color,
    muted: Color,
    accent: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                title: Color::Black,
                text: Color::BrightBlack,
                muted: Color::White,
                accent: Color::Green,
            },
            Theme::Dark => Self {
                title: Color::BrightWhite,
                text: Color::White,
                muted: Color::BrightBlack,
                accent: Color::BrightGreen,
            },
        }
    }

    fn title(self, s: &str) -> ColoredString {
        s.color(self.title).bold()
    }

    fn text(self, s: &str) -> ColoredString {
        s.color(self.text)
    }

    fn muted(self, s: &str) -> ColoredString {
        s.color(self.muted)
    }

    fn accent(self, s: &str) -> ColoredString {
        s.color(self.accent)
    }
}

pub(crate) struct Frame<'a, F> {
    view: View<'a>,
    is_copied: F,
}

impl<'a, F> Frame<'a, F>
where
    F: Fn(&str, CopyField) -> bool,
{
    pub(crate) fn new(view: View<'a>, is_copied: F) -> Self {
        Self { view, is_copied }
    }

    fn copied_mark(&self, palette: Palette, installer: &Installer, field: CopyField) -> String {
        if (self.is_copied)(&installer.siret, field) {
            format!("  {}", palette.accent(COPIED))
        } else {
            String::new()
        }
    }

    fn write_card(
        &self,
        f: &mut fmt::Formatter<'_>,
        palette: Palette,
        index: usize,
        installer: &Installer,
    ) -> fmt::Result {
        writeln!(
            f,
            "{}",
            palette.title(&format!("[{index}] {}", installer.nom))
        )?;

        let mut lines = installer.adresse.lines();
        let first = lines.next().unwrap_or_default();
        writeln!(
            f,
            "    {} {}{}",
            palette.accent("Adresse :"),
            palette.text(first),
            self.copied_mark(palette, installer, CopyField::Address)
        )?;
        for line in lines {
            writeln!(f, "              {}", palette.text(line))?;
        }

        writeln!(
            f,
            "    {} {} {}{}",
            palette.accent("Tél.    :"),
            palette.text(&installer.phone),
            palette.muted(&format!("({})", tel_link(installer))),
            self.copied_mark(palette, installer, CopyField::Phone)
        )?;
        writeln!(
            f,
            "    {} {} {}{}",
            palette.accent("Email   :"),
            palette.text(&installer.email),
            palette.muted(&format!("({})", mailto_link(installer))),
            self.copied_mark(palette, installer, CopyField::Email)
        )?;
        writeln!(
            f,
            "    {} {}",
            palette.accent("SIRET   :"),
            palette.muted(&installer.siret)
        )
    }
}

impl<F> fmt::Display for Frame<'_, F>
where
    F: Fn(&str, CopyField) -> bool,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let palette = Palette::for_theme(self.view.theme);
        let search = self.view.search;

        writeln!(f, "{}", palette.title("SarNad Solutions"))?;
        writeln!(
            f,
            "{}",
            palette.muted(
                "Trouvez les meilleurs installateurs de panneaux solaires près de chez vous"
            )
        )?;

        let field_label = match search.field {
            SearchField::Location => "[Localisation]",
            SearchField::Name => "[Nom]",
        };
        let term = if search.term.is_empty() {
            palette.muted(search_placeholder(search.field))
        } else {
            palette.text(&search.term)
        };
        writeln!(f, "{} {term}", palette.accent(field_label))?;
        writeln!(f)?;

        for (i, installer) in self.view.visible.iter().enumerate() {
            self.write_card(f, palette, i + 1, installer)?;
            writeln!(f)?;
        }

        if self.view.is_empty() {
            writeln!(f, "{}", palette.muted(NO_RESULTS))?;
        }

        if self.view.truncated {
            let notice = format!(
                "Affichage des {DISPLAY_CAP} premiers installateurs sur {}. Affinez votre recherche.",
                self.view.total_matches
            );
            writeln!(f, "{}", palette.muted(&notice))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sarnad_core::{Action, RecordStore, Session};

    use super::*;

    fn installer(nom: &str, localisation: &str, siret: &str) -> Installer {
        Installer {
            nom: nom.to_string(),
            localisation: localisation.to_string(),
            adresse: "12 Rue A\n75001 Paris".to_string(),
            phone: "01 23 45 67 89".to_string(),
            email: format!("{siret}@example.fr"),
            siret: siret.to_string(),
        }
    }

    fn session(records: Vec<Installer>) -> Session {
        Session::new(RecordStore::from_records(records).unwrap())
    }

    #[test]
    fn renders_cards_with_contact_details() {
        let session = session(vec![installer("Soleil", "Paris", "111")]);
        let out = Frame::new(session.view(), |_, _| false).to_string();
        assert!(out.contains("[1] Soleil"));
        assert!(out.contains("12 Rue A"));
        assert!(out.contains("75001 Paris"));
        assert!(out.contains("tel:01 23 45 67 89"));
        assert!(out.contains("mailto:111@example.fr"));
        assert!(out.contains("SIRET"));
        assert!(!out.contains(COPIED));
        assert!(!out.contains(NO_RESULTS));
    }

    #[test]
    fn renders_no_results_message() {
        let mut session = session(vec![installer("Soleil", "Paris", "111")]);
        session.apply(Action::SetTerm("Brest".to_string()));
        let out = Frame::new(session.view(), |_, _| false).to_string();
        assert!(out.contains(NO_RESULTS));
        assert!(!out.contains("Affinez"));
    }

    #[test]
    fn renders_copied_marker_only_for_flagged_field() {
        let session = session(vec![installer("Soleil", "Paris", "111")]);
        let out = Frame::new(session.view(), |siret: &str, field: CopyField| {
            siret == "111" && field == CopyField::Email
        })
        .to_string();
        assert_eq!(out.matches(COPIED).count(), 1);
        let email_line = out.lines().find(|l| l.contains("Email")).unwrap();
        assert!(email_line.contains(COPIED));
    }

    #[test]
    fn renders_truncation_notice() {
        let records = (0..60)
            .map(|i| installer(&format!("Installateur {i}"), "Paris", &i.to_string()))
            .collect();
        let mut session = session(records);
        session.apply(Action::SetTerm(String::new()));
        let out = Frame::new(session.view(), |_, _| false).to_string();
        assert!(out.contains("[50] Installateur 49"));
        assert!(!out.contains("[51]"));
        assert!(out.contains("Affichage des 50 premiers installateurs sur 60"));
    }

    #[test]
    fn empty_term_shows_placeholder() {
        let mut session = session(vec![installer("Soleil", "Paris", "111")]);
        session.apply(Action::SetField(SearchField::Name));
        session.apply(Action::SetTerm(String::new()));
        let out = Frame::new(session.view(), |_, _| false).to_string();
        assert!(out.contains("[Nom]"));
        assert!(out.contains("Rechercher par nom de société"));
    }

    #[test]
    fn themes_use_different_palettes() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light, dark);
        assert_eq!(dark.title, Color::BrightWhite);
        assert_eq!(light.accent, Color::Green);
    }

    #[test]
    fn plain_output_when_color_is_disabled() {
        colored::control::set_override(false);
        let mut session = session(vec![installer("Soleil", "Paris", "111")]);
        session.apply(Action::ToggleTheme);
        let out = Frame::new(session.view(), |siret: &str, field: CopyField| {
            siret == "111" && field == CopyField::Phone
        })
        .to_string();
        assert!(!out.contains("\x1b["));
        assert!(out.starts_with("SarNad Solutions\n"));
        assert!(out.contains("[Localisation] Paris"));
    }
}
