//! Line-driven interactive session.
//!
//! Every input line is one event. Plain text replaces the search term;
//! lines starting with `:` are commands, and `::` escapes a literal colon.
//! Copy-flag expiries arrive on a channel from [`ExpiryScheduler`] and
//! trigger a re-render.

use sarnad_core::{
    map_url, Action, AppConfig, ClipboardWriter, CopyField, CopyKey, ExternalOpener, SearchField,
    Session, TimerHandle,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::capabilities::{SystemClipboard, SystemOpener};
use crate::render::Frame;
use crate::timers::ExpiryScheduler;

const HELP: &str = "\
texte        rechercher (vide = vue par défaut)
::texte      rechercher un terme commençant par ':'
:loc         rechercher par localisation
:nom         rechercher par nom de société
:clear       effacer la recherche
:theme       basculer thème clair / sombre
:copy N CHAMP  copier phone | email | address du résultat N
:map N       ouvrir l'adresse du résultat N sur une carte
:quit        quitter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Search(String),
    Field(SearchField),
    Clear,
    Theme,
    Copy { index: usize, field: CopyField },
    Map { index: usize },
    Help,
    Quit,
}

/// Parse one input line (without its newline) into a [`Command`].
///
/// A leading `::` stands for a literal `:` in a search term.
pub(crate) fn parse_command(line: &str) -> anyhow::Result<Command> {
    if line.starts_with("::") {
        return Ok(Command::Search(line[1..].to_string()));
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Command::Search(line.to_string()));
    };

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let command = match name {
        "loc" | "location" | "localisation" => Command::Field(SearchField::Location),
        "nom" | "name" => Command::Field(SearchField::Name),
        "clear" => Command::Clear,
        "theme" => Command::Theme,
        "copy" => {
            let index = parse_index(words.next())?;
            let field = words
                .next()
                .ok_or_else(|| anyhow::anyhow!("usage: :copy N phone|email|address"))?
                .parse::<CopyField>()?;
            Command::Copy { index, field }
        }
        "map" => Command::Map {
            index: parse_index(words.next())?,
        },
        "help" | "?" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => anyhow::bail!("unknown command ':{other}'; type :help"),
    };

    if let Some(extra) = words.next() {
        anyhow::bail!("unexpected argument '{extra}'");
    }
    Ok(command)
}

fn parse_index(word: Option<&str>) -> anyhow::Result<usize> {
    let word = word.ok_or_else(|| anyhow::anyhow!("missing result number"))?;
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => anyhow::bail!("'{word}' is not a result number"),
    }
}

/// Side-effecting collaborators of the loop, grouped so tests can fake them.
pub(crate) struct Capabilities<'c, C: ?Sized, O: ?Sized> {
    pub(crate) clipboard: &'c mut C,
    pub(crate) opener: &'c mut O,
    pub(crate) map_search_url: &'c str,
}

/// Apply one command. Returns a notice for the user, if any.
pub(crate) fn handle<C, O>(
    command: Command,
    session: &mut Session,
    timers: &mut ExpiryScheduler,
    caps: &mut Capabilities<'_, C, O>,
) -> Option<String>
where
    C: ClipboardWriter + ?Sized,
    O: ExternalOpener + ?Sized,
{
    let action = match command {
        Command::Search(term) => Action::SetTerm(term),
        Command::Field(field) => Action::SetField(field),
        Command::Clear => Action::Clear,
        Command::Theme => Action::ToggleTheme,
        Command::Copy { index, field } => return copy(session, timers, caps, index, field),
        Command::Map { index } => return open_map(session, caps, index),
        Command::Help => return Some(HELP.to_string()),
        Command::Quit => return None,
    };

    let cancelled: Vec<(CopyKey, TimerHandle)> = session.apply(action);
    for (key, _) in &cancelled {
        timers.cancel(key);
    }
    None
}

fn visible_siret(session: &Session, index: usize) -> Option<String> {
    let view = session.view();
    let position = index.checked_sub(1)?;
    view.visible.get(position).map(|r| r.siret.clone())
}

fn copy<C, O>(
    session: &mut Session,
    timers: &mut ExpiryScheduler,
    caps: &mut Capabilities<'_, C, O>,
    index: usize,
    field: CopyField,
) -> Option<String>
where
    C: ClipboardWriter + ?Sized,
    O: ExternalOpener + ?Sized,
{
    let Some(siret) = visible_siret(session, index) else {
        return Some(format!("pas de résultat n°{index}"));
    };

    match session.request_copy(&mut *caps.clipboard, &siret, field) {
        Ok(scheduled) => {
            timers.schedule(CopyKey::new(siret, field), scheduled.handle);
            None
        }
        Err(e) => Some(format!("copie impossible : {e}")),
    }
}

fn open_map<C, O>(
    session: &Session,
    caps: &mut Capabilities<'_, C, O>,
    index: usize,
) -> Option<String>
where
    C: ClipboardWriter + ?Sized,
    O: ExternalOpener + ?Sized,
{
    let view = session.view();
    let Some(installer) = index.checked_sub(1).and_then(|i| view.visible.get(i)) else {
        return Some(format!("pas de résultat n°{index}"));
    };

    let url = map_url(caps.map_search_url, installer);
    match caps.opener.open_external(&url) {
        Ok(()) => {
            tracing::info!(siret = %installer.siret, "opened map");
            None
        }
        Err(e) => {
            tracing::warn!(siret = %installer.siret, error = %e, "could not open map");
            Some(url)
        }
    }
}

fn print_frame(session: &mut Session, notice: Option<&str>) {
    session.expire_due();
    let frame = Frame::new(session.view(), |siret: &str, field: CopyField| {
        session.is_copied(siret, field)
    });
    println!("{frame}");
    if let Some(notice) = notice {
        println!("{notice}");
    }
}

/// Run the interactive loop until `:quit` or end of input.
///
/// # Errors
///
/// Returns an error only if reading standard input fails.
pub(crate) async fn run(mut session: Session, config: &AppConfig) -> anyhow::Result<()> {
    let mut clipboard = SystemClipboard::new();
    let mut opener = SystemOpener;
    let mut caps = Capabilities {
        clipboard: &mut clipboard,
        opener: &mut opener,
        map_search_url: &config.map_search_url,
    };
    let (mut timers, mut expired_rx) = ExpiryScheduler::new(session.copies().window());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_frame(&mut session, Some(":help pour la liste des commandes"));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        let notice = handle(command, &mut session, &mut timers, &mut caps);
                        print_frame(&mut session, notice.as_deref());
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Some(expired) = expired_rx.recv() => {
                timers.fired(&expired);
                if session.expire_copy(&expired.key, expired.handle) {
                    print_frame(&mut session, None);
                }
            }
        }
    }

    tracing::debug!(pending = timers.in_flight(), "interactive session closed");
    Ok(())
}

#[cfg(test)]
#[path = "interactive_test.rs"]
mod tests;
