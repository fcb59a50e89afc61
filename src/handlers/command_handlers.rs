use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::state::AppState;
use crate::ui::{format_changes, render_view, TerminalRenderer};
use facetsearch_core::Renderer;

const HELP: &str = "\
Commands:
  <facet>=<value>   toggle a facet value
  more              show the next page of items
  clear             deselect every facet value
  show              redraw everything
  help              this text
  quit              leave";

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle { facet: String, value: String },
    More,
    Clear,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if let Some((facet, value)) = input.split_once('=') {
            return Ok(Command::Toggle {
                facet: facet.trim().to_string(),
                value: value.trim().to_string(),
            });
        }

        match input.to_ascii_lowercase().as_str() {
            "more" | "m" => Ok(Command::More),
            "clear" | "c" => Ok(Command::Clear),
            "show" | "s" | "" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'. Type 'help' for a list.", other)),
        }
    }
}

/// Whether the session keeps reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Execute a command and return what to print
pub fn handle_command(state: &mut AppState, command: Command) -> (Flow, String) {
    match command {
        Command::Toggle { facet, value } => {
            if !state.search.toggle(&facet, &value) {
                return (
                    Flow::Continue,
                    format!("No value '{}' in facet '{}'.\n", value, facet),
                );
            }
            let events = state.take_events();
            (Flow::Continue, format_changes(state, &events))
        }
        Command::Clear => {
            state.search.clear();
            let events = state.take_events();
            (Flow::Continue, format_changes(state, &events))
        }
        Command::More => (Flow::Continue, show_more(state)),
        Command::Show => (Flow::Continue, render_view(state)),
        Command::Help => (Flow::Continue, format!("{}\n", HELP)),
        Command::Quit => (Flow::Quit, String::new()),
    }
}

/// Grow the pager and print just the newly revealed items
fn show_more(state: &mut AppState) -> String {
    if !state.has_more() {
        return "All matching items are shown.\n".to_string();
    }

    let shown_before = state.pager.visible_count(state.search.active_count());
    state.pager.show_more();

    let facets = state.search.facets();
    let mut renderer = TerminalRenderer::new(facets);
    for item in state.displayed_items().into_iter().skip(shown_before) {
        renderer.render_item(item);
    }
    if state.has_more() {
        renderer.push_line("(more available)");
    }
    renderer.finish()
}

/// Read commands line by line until `quit` or end of input
pub fn run_interactive<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    mut output: W,
) -> io::Result<()> {
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let reply = match line.parse::<Command>() {
            Ok(command) => {
                log::debug!("command: {:?}", command);
                let (flow, reply) = handle_command(state, command);
                if flow == Flow::Quit {
                    return Ok(());
                }
                reply
            }
            Err(message) => format!("{}\n", message),
        };

        write!(output, "{}> ", reply)?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ViewSettings;
    use facetsearch_core::Dataset;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn state() -> AppState {
        colored::control::set_override(false);
        let dataset: Dataset = serde_json::from_value(json!({
            "facets": {"color": "Color"},
            "items": [
                {"name": "A", "color": "red"},
                {"name": "B", "color": "blue"},
                {"name": "C", "color": "red"}
            ],
            "pagination_count": 1
        }))
        .unwrap();
        AppState::new(dataset, ViewSettings::default(), None)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            " color = red ".parse::<Command>(),
            Ok(Command::Toggle {
                facet: "color".into(),
                value: "red".into()
            })
        );
        assert_eq!("MORE".parse::<Command>(), Ok(Command::More));
        assert_eq!("".parse::<Command>(), Ok(Command::Show));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
        assert!("dance".parse::<Command>().is_err());
    }

    #[test]
    fn test_toggle_unknown_value() {
        let mut state = state();
        let (flow, out) = handle_command(
            &mut state,
            Command::Toggle {
                facet: "color".into(),
                value: "green".into(),
            },
        );
        assert_eq!(flow, Flow::Continue);
        assert_eq!(out, "No value 'green' in facet 'color'.\n");
    }

    #[test]
    fn test_show_more_prints_only_new_items() {
        let mut state = state();

        let out = show_more(&mut state);
        assert_eq!(out, "• B  Color: blue\n(more available)\n");

        let out = show_more(&mut state);
        assert_eq!(out, "• C  Color: red\n");

        assert_eq!(show_more(&mut state), "All matching items are shown.\n");
    }

    #[test]
    fn test_interactive_session() {
        let mut state = state();
        let input = "color=red\nclear\nbogus\nquit\ncolor=blue\n";
        let mut output = Vec::new();

        run_interactive(&mut state, input.as_bytes(), &mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("selected color=red"));
        assert!(output.contains("- • B  Color: blue"));
        assert!(output.contains("deselected color=red"));
        assert!(output.contains("Unknown command 'bogus'"));
        // input after quit is never read
        assert!(!output.contains("color=blue"));
        assert_eq!(state.search.active_count(), 3);
    }
}
