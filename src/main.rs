//! Interactive shell for the filter composition engine.
//!
//! Two surfaces over one shared filter state, exactly like the app this
//! engine backs: free text goes through the NL interpreter and the
//! assistant synchronizer; slash commands are the direct-manipulation
//! panel. One poll tick runs per loop turn, so removing a field with
//! `/remove` surfaces an assistant notice on the next prompt.

use sift::catalog::catalog;
use sift::line_editor::{LineEditor, ReadResult};
use sift::session::FilterSession;
use sift::storage::FileStorage;
use sift::sync::Synchronizer;
use sift::transcript::{Message, Transcript};
use sift::types::{FieldKind, FieldValue};
use sift::ui::{self, icon};

fn main() {
    let data_dir = std::env::var_os("HOME")
        .map(|home| std::path::PathBuf::from(home).join(".sift"))
        .unwrap_or_else(|| std::path::PathBuf::from(".sift"));

    let mut session = FilterSession::open(Box::new(FileStorage::new(&data_dir)));
    let mut assistant = Synchronizer::new(Transcript::open(Box::new(FileStorage::new(&data_dir))));
    assistant.open(session.set());

    println!("{}", ui::bold_cyan("sift — filter composition shell"));
    println!(
        "{}",
        ui::dim("Type a request (\"chromatography data from last week\") or /help for commands.")
    );
    println!();

    let mut editor = LineEditor::new();
    loop {
        let prompt = if session.show_save_control() {
            format!("{} sift> ", ui::yellow(icon::ACTIVE))
        } else {
            format!("{} sift> ", ui::dim(icon::PENDING))
        };

        let line = match editor.read_line(&prompt) {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => continue,
            ReadResult::Eof => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history(line);

        if let Some(command) = line.strip_prefix('/') {
            if !handle_command(command, &mut session, &mut assistant) {
                break;
            }
        } else if assistant.is_open() {
            let reply = assistant.handle_user_text(line, &mut session);
            print_assistant(reply);
        } else {
            println!("{}", ui::dim("Assistant is closed. /open to reopen."));
        }

        // The shell's poll tick: one sample per loop turn.
        if let Some(notice) = assistant.poll_tick(session.set()) {
            print_assistant(notice);
        }
    }

    println!("{}", ui::dim("bye"));
}

// ---------------------------------------------------------------------------
// Direct-manipulation commands (the "panel" surface)
// ---------------------------------------------------------------------------

/// Returns `false` when the shell should exit.
fn handle_command(command: &str, session: &mut FilterSession, assistant: &mut Synchronizer) -> bool {
    let mut parts = command.split_whitespace();
    let verb = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    match verb {
        "help" => print_help(),
        "fields" => {
            for field in session.set().available_fields() {
                println!("  {} {} ({})", icon::PENDING, field.label, ui::dim(&field.id));
            }
        }
        "panel" => print_panel(session),
        "add" => match args.first() {
            Some(&id) => session.set_mut().add_field(id),
            None => usage("/add <field-id>"),
        },
        "remove" => match args.first() {
            Some(&id) => session.set_mut().remove_field(id),
            None => usage("/remove <field-id>"),
        },
        "move" => match args.as_slice() {
            &[dragged, target] => session.set_mut().reorder(dragged, target),
            _ => usage("/move <dragged-id> <target-id>"),
        },
        "set" => match args.split_first() {
            Some((&id, rest)) if !rest.is_empty() => set_value(session, id, &rest.join(" ")),
            _ => usage("/set <field-id> <value>"),
        },
        "presets" => {
            for preset in session.store().list() {
                let marker = if session.loaded_name() == Some(preset.name.as_str()) {
                    ui::green(icon::ACTIVE)
                } else {
                    ui::dim(icon::PENDING)
                };
                println!("  {} {}", marker, preset.name);
            }
        }
        "save" if args.is_empty() => usage("/save <name>"),
        "save" => {
            let name = args.join(" ");
            match session.save_preset(&name) {
                Ok(outcome) => {
                    println!("{} {} \"{}\"", ui::green(icon::OK), outcome.message(), name)
                }
                Err(err) => println!("{} {}", ui::red(icon::FAIL), err),
            }
        }
        "load" if args.is_empty() => usage("/load <name>"),
        "load" => {
            let name = args.join(" ");
            if session.load_preset(&name) {
                print_panel(session);
            } else {
                println!("{} no preset named \"{}\"", ui::red(icon::FAIL), name);
            }
        }
        "delete" if args.is_empty() => usage("/delete <name>"),
        "delete" => {
            let name = args.join(" ");
            match session.delete_preset(&name) {
                Ok(true) => println!("{} deleted \"{}\"", ui::green(icon::OK), name),
                Ok(false) => println!("{} no preset named \"{}\"", ui::red(icon::FAIL), name),
                Err(err) => println!("{} {}", ui::red(icon::FAIL), err),
            }
        }
        "new" => {
            session.new_filter();
            println!("{} new filter", ui::green(icon::OK));
        }
        "search" => {
            let query = session.search();
            match serde_json::to_string_pretty(&query) {
                Ok(json) => println!("{}", json),
                Err(err) => println!("{} {}", ui::red(icon::FAIL), err),
            }
        }
        "close" => {
            assistant.close();
            println!("{}", ui::dim("assistant closed"));
        }
        "open" => {
            assistant.open(session.set());
            for message in assistant.transcript().messages() {
                println!("  {} {}", ui::dim(&message.role.to_string()), message.text);
            }
        }
        "quit" | "exit" => return false,
        other => println!("{} unknown command '/{}' (try /help)", ui::red(icon::FAIL), other),
    }
    true
}

fn set_value(session: &mut FilterSession, id: &str, raw: &str) {
    let Some(kind) = catalog().kind_of(id) else {
        println!("{} unknown field '{}'", ui::red(icon::FAIL), id);
        return;
    };
    let value = match kind {
        FieldKind::Text => FieldValue::Text(raw.to_string()),
        FieldKind::Date => FieldValue::Date(raw.to_string()),
        FieldKind::SingleSelect => FieldValue::Selection(raw.to_string()),
        FieldKind::Tags => FieldValue::Tags(raw.to_string()),
        FieldKind::DateRange => {
            // "/set created_between 2026-01-01 2026-02-01"
            let mut dates = raw.split_whitespace();
            match (dates.next(), dates.next()) {
                (Some(start), Some(end)) => FieldValue::Range {
                    start: start.to_string(),
                    end: end.to_string(),
                    label: None,
                },
                _ => {
                    usage("/set <range-field> <start> <end>");
                    return;
                }
            }
        }
    };
    if let Err(err) = session.set_mut().set_value(id, value) {
        println!("{} {}", ui::red(icon::FAIL), err);
    }
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn print_panel(session: &FilterSession) {
    if session.set().is_empty() {
        println!("{}", ui::dim("(no active fields — New Filter)"));
        return;
    }
    if let Some(name) = session.loaded_name() {
        let dirty = if session.is_modified() { " *" } else { "" };
        println!("{}{}", ui::bold(name), ui::yellow(dirty));
    }
    for id in session.set().active_fields() {
        let label = catalog().label_of(id);
        match session.set().value_of(id) {
            Some(value) if !value.is_empty() => {
                println!("  {} {} {} {}", icon::ACTIVE, label, icon::ARROW_RIGHT, value)
            }
            _ => println!("  {} {} {}", icon::ACTIVE, label, ui::dim("(unset)")),
        }
    }
}

fn print_assistant(message: &Message) {
    println!("{} {}", ui::bold_green("assistant:"), message.text);
    if !message.suggestions.is_empty() {
        let pills = message
            .suggestions
            .iter()
            .map(|s| format!("[{}]", s))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {}", ui::cyan(&pills));
    }
}

fn print_help() {
    println!("{}", ui::bold("panel commands"));
    println!("  /fields              list available fields");
    println!("  /panel               show the active filter");
    println!("  /add <id>            add a field (shortcuts normalize to a date range)");
    println!("  /remove <id>         remove a field");
    println!("  /move <id> <id>      drag a field onto another's position");
    println!("  /set <id> <value>    set a field's value");
    println!("{}", ui::bold("presets"));
    println!("  /presets /save <name> /load <name> /delete <name> /new");
    println!("{}", ui::bold("assistant"));
    println!("  just type a request, or /open /close");
    println!("{}", ui::bold("other"));
    println!("  /search /help /quit");
}

fn usage(text: &str) {
    println!("{} usage: {}", ui::dim(icon::PENDING), text);
}
