//! Command-line front end: argument parsing, dispatch and plain-text rendering.

use std::fmt::Write;

use crate::controller::NoteApp;
use crate::error::ClientError;
use crate::models::NoteId;

pub const USAGE: &str = "\
usage: noteapp <command>

commands:
  list [--important]          show notes
  login <username> <password> log in and remember the session
  logout                      forget the stored session
  whoami                      show the logged-in user
  add <content> [--important] create a note (requires login)
  toggle <id>                 flip a note's importance";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List { important_only: bool },
    Login { username: String, password: String },
    Logout,
    Whoami,
    Add { content: String, important: bool },
    Toggle { id: NoteId },
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Command, String> {
        let (name, rest) = match args.split_first() {
            Some((name, rest)) => (name.as_str(), rest),
            None => return Err("missing command".to_string()),
        };

        let (flags, positional): (Vec<&String>, Vec<&String>) =
            rest.iter().partition(|a| a.starts_with("--"));
        if let Some(unknown) = flags.iter().find(|f| f.as_str() != "--important") {
            return Err(format!("unknown flag '{}'", unknown));
        }
        let important = !flags.is_empty();
        if important && !matches!(name, "list" | "add") {
            return Err(format!("'{}' does not take --important", name));
        }

        match (name, positional.as_slice()) {
            ("list", []) => Ok(Command::List {
                important_only: important,
            }),
            ("login", [username, password]) => Ok(Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            }),
            ("logout", []) => Ok(Command::Logout),
            ("whoami", []) => Ok(Command::Whoami),
            ("add", [content]) => Ok(Command::Add {
                content: content.to_string(),
                important,
            }),
            ("toggle", [id]) => Ok(Command::Toggle {
                id: match id.parse::<NoteId>() {
                    Ok(id) => id,
                    Err(never) => match never {},
                },
            }),
            ("list" | "login" | "logout" | "whoami" | "add" | "toggle", _) => {
                Err(format!("wrong arguments for '{}'", name))
            }
            _ => Err(format!("unknown command '{}'", name)),
        }
    }
}

/// Mount the app and run one command against it.
///
/// A failed mount is only fatal for `list`; other commands still run so that
/// login and logout work while the note listing is unavailable.
pub async fn run(app: &mut NoteApp, command: Command) -> Result<(), ClientError> {
    let mounted = app.mount().await;

    match command {
        Command::List { important_only } => {
            mounted?;
            if important_only && app.show_all() {
                app.toggle_filter();
            }
            Ok(())
        }
        Command::Login { username, password } => {
            app.set_username(username);
            app.set_password(password);
            app.submit_login_form().await.map(|_| ())
        }
        Command::Logout => app.logout(),
        Command::Whoami => Ok(()),
        Command::Add { content, important } => {
            app.submit_note(content, important).await.map(|_| ())
        }
        Command::Toggle { id } => app.toggle_importance(&id).await.map(|_| ()),
    }
}

/// Plain-text rendering of the current view state.
pub fn render(app: &NoteApp) -> String {
    let mut out = String::new();

    if let Some(message) = app.error_message() {
        let _ = writeln!(out, "! {}", message);
    }

    match app.user() {
        Some(user) => {
            let _ = writeln!(out, "{} logged in", user.name);
        }
        None => {
            let _ = writeln!(out, "not logged in");
        }
    }

    let shown = app.notes_to_show();
    let _ = writeln!(
        out,
        "{} of {} notes ({})",
        shown.len(),
        app.notes().len(),
        if app.show_all() { "all" } else { "important" }
    );
    for note in shown {
        let marker = if note.important { "*" } else { " " };
        let _ = writeln!(out, "{} [{}] {}", marker, note.id, note.content);
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            Command::parse(&args(&["list"])),
            Ok(Command::List {
                important_only: false
            })
        );
        assert_eq!(
            Command::parse(&args(&["list", "--important"])),
            Ok(Command::List {
                important_only: true
            })
        );
        assert_eq!(
            Command::parse(&args(&["login", "alice", "pw"])),
            Ok(Command::Login {
                username: "alice".to_string(),
                password: "pw".to_string()
            })
        );
        assert_eq!(
            Command::parse(&args(&["add", "buy milk", "--important"])),
            Ok(Command::Add {
                content: "buy milk".to_string(),
                important: true
            })
        );
        assert_eq!(
            Command::parse(&args(&["toggle", "3"])),
            Ok(Command::Toggle {
                id: NoteId::Number(3)
            })
        );
        assert_eq!(Command::parse(&args(&["logout"])), Ok(Command::Logout));
        assert_eq!(Command::parse(&args(&["whoami"])), Ok(Command::Whoami));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse(&[]).is_err());
        assert!(Command::parse(&args(&["frobnicate"])).is_err());
        assert!(Command::parse(&args(&["login", "alice"])).is_err());
        assert!(Command::parse(&args(&["toggle"])).is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_flags() {
        assert_eq!(
            Command::parse(&args(&["list", "--importnt"])),
            Err("unknown flag '--importnt'".to_string())
        );
        assert!(Command::parse(&args(&["add", "milk", "--urgent"])).is_err());
        assert!(Command::parse(&args(&["toggle", "3", "--important"])).is_err());
    }

    #[test]
    fn test_parse_text_id() {
        assert_eq!(
            Command::parse(&args(&["toggle", "5f1a"])),
            Ok(Command::Toggle {
                id: NoteId::from("5f1a")
            })
        );
    }
}
