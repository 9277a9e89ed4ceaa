//! Fakes shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::installers::Installer;
use crate::interaction::{ClipboardWriter, Clock};
use crate::InteractionError;

/// Clock that only moves when told to.
pub(crate) struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Instant::now()),
        })
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}

/// Clipboard that records writes, or refuses them all.
#[derive(Default)]
pub(crate) struct FakeClipboard {
    pub(crate) writes: Vec<String>,
    pub(crate) broken: bool,
}

impl FakeClipboard {
    pub(crate) fn broken() -> Self {
        Self {
            writes: Vec::new(),
            broken: true,
        }
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write(&mut self, text: &str) -> Result<(), InteractionError> {
        if self.broken {
            return Err(InteractionError::Clipboard("no display".to_string()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

pub(crate) fn installer(nom: &str, localisation: &str, siret: &str) -> Installer {
    Installer {
        nom: nom.to_string(),
        localisation: localisation.to_string(),
        adresse: format!("{siret} Rue du Soleil\n75001 {localisation}"),
        phone: format!("01 00 00 00 {siret:0>2}"),
        email: format!("contact{siret}@example.fr"),
        siret: siret.to_string(),
    }
}
