//! Grouped help rendering for the global command listing
//!
//! Commands are displayed by namespace: the default group first,
//! then each named namespace in registration order, then aliases.
//! Namespacing is display-only and never affects dispatch. Help text
//! wraps to the live terminal width, aligned past the longest command
//! name so descriptions line up in one column.

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

/// One row of the listing: a command (or alias) and its description
#[derive(Debug, Clone)]
pub(crate) struct CmdHelp {
    pub cmd: String,
    pub help: String,
}

/// Insertion-ordered display groups. Ordering is a user-visible
/// invariant: the default group always renders first and aliases last,
/// with named namespaces in between in registration order.
#[derive(Debug, Default)]
pub(crate) struct HelpGroups {
    default: Vec<CmdHelp>,
    namespaces: Vec<(String, Vec<CmdHelp>)>,
    aliases: Vec<CmdHelp>,
}

impl HelpGroups {
    pub fn push(&mut self, namespace: Option<&str>, entry: CmdHelp) {
        match namespace {
            None => self.default.push(entry),
            Some(label) => {
                if let Some((_, entries)) =
                    self.namespaces.iter_mut().find(|(name, _)| name == label)
                {
                    entries.push(entry);
                } else {
                    self.namespaces.push((label.to_string(), vec![entry]));
                }
            }
        }
    }

    pub fn push_alias(&mut self, entry: CmdHelp) {
        self.aliases.push(entry);
    }

    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }
}

/// Fetch the terminal width, with a conventional fallback for pipes
/// and tests.
pub(crate) fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _rows)| cols as usize)
        .unwrap_or(80)
}

/// Render the full listing. `longest` is the display width of the
/// longest registered command name; `term_width` the column budget.
pub(crate) fn render(groups: &HelpGroups, longest: usize, term_width: usize) -> String {
    // Narrow terminals still get a usable wrap column.
    let wrap_width = term_width.saturating_sub(longest + 24).max(16);
    let mut out = String::new();

    out.push_str(&format!("{}\n", "List of available commands:".green()));

    for entry in &groups.default {
        push_row(&mut out, entry, Row::Default, longest, wrap_width);
    }

    for (label, entries) in &groups.namespaces {
        out.push_str(&format!("{}\n", label.magenta().bold()));
        for entry in entries {
            push_row(&mut out, entry, Row::Namespaced, longest, wrap_width);
        }
    }

    if groups.has_aliases() {
        out.push_str(&format!("{}\n", "Alias".magenta().italic()));
        for entry in &groups.aliases {
            push_row(&mut out, entry, Row::Alias, longest, wrap_width);
        }
    }

    out
}

#[derive(Clone, Copy)]
enum Row {
    Default,
    Namespaced,
    Alias,
}

fn push_row(out: &mut String, entry: &CmdHelp, row: Row, longest: usize, wrap_width: usize) {
    let mut lines = wrap(&entry.help, wrap_width);
    if lines.is_empty() {
        lines.push(String::new());
    }

    let first = &lines[0];
    match row {
        Row::Default => {
            let cell = pad(&entry.cmd, longest + 8);
            out.push_str(&format!("{}{}\n", cell.cyan(), first));
        }
        Row::Namespaced => {
            let cell = pad(&entry.cmd, longest + 4);
            out.push_str(&format!("    {}{}\n", cell.cyan(), first));
        }
        Row::Alias => {
            let cell = pad(&entry.cmd, longest + 4);
            out.push_str(&format!(
                "    {}{}\n",
                cell.dimmed().italic(),
                first.dimmed()
            ));
        }
    }

    for line in &lines[1..] {
        out.push_str(&" ".repeat(longest + 8));
        out.push_str(line);
        out.push('\n');
    }
}

fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut cell = text.to_string();
    if used < width {
        cell.push_str(&" ".repeat(width - used));
    }
    cell
}

/// Greedy word wrap by display width. Words longer than the budget get
/// a line of their own rather than being split mid-word.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if used > 0 && used + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
            used = 0;
        }
        if used > 0 {
            line.push(' ');
            used += 1;
        }
        line.push_str(word);
        used += word_width;
    }

    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(cmd: &str, help: &str) -> CmdHelp {
        CmdHelp {
            cmd: cmd.to_string(),
            help: help.to_string(),
        }
    }

    fn plain_groups() -> HelpGroups {
        let mut groups = HelpGroups::default();
        groups.push(None, entry("cow", "say stuff"));
        groups.push(Some("Arithmetic"), entry("add", "Add 2 numbers"));
        groups.push(Some("Arithmetic"), entry("sub", "Subtract"));
        groups.push(Some("Mood"), entry("mood", "Report the mood"));
        groups.push_alias(entry("a", "add"));
        groups
    }

    #[test]
    fn test_groups_preserve_insertion_order() {
        colored::control::set_override(false);
        let rendered = render(&plain_groups(), 4, 80);

        let arith = rendered.find("Arithmetic").unwrap();
        let mood = rendered.find("Mood").unwrap();
        let alias = rendered.find("Alias").unwrap();
        let cow = rendered.find("cow").unwrap();
        assert!(cow < arith);
        assert!(arith < mood);
        assert!(mood < alias);

        let add = rendered.find("add").unwrap();
        let sub = rendered.find("sub").unwrap();
        assert!(add < sub);
    }

    #[test]
    fn test_alias_section_omitted_when_empty() {
        colored::control::set_override(false);
        let mut groups = HelpGroups::default();
        groups.push(None, entry("solo", "the only one"));
        let rendered = render(&groups, 4, 80);
        assert!(!rendered.contains("Alias"));
    }

    #[test]
    fn test_empty_help_renders_empty_description() {
        colored::control::set_override(false);
        let mut groups = HelpGroups::default();
        groups.push(None, entry("quiet", ""));
        let rendered = render(&groups, 5, 80);
        assert!(rendered.contains("quiet"));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_long_help_wraps_and_indents() {
        colored::control::set_override(false);
        let mut groups = HelpGroups::default();
        groups.push(
            None,
            entry(
                "wide",
                "this description is long enough that it must wrap onto a continuation line",
            ),
        );
        let rendered = render(&groups, 4, 48);
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines.len() > 2);
        // Continuation lines are indented to the alignment column.
        assert!(lines[2].starts_with(&" ".repeat(4 + 8)));
    }

    #[test]
    fn test_wrap_budget() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn test_rendering_is_idempotent() {
        colored::control::set_override(false);
        let groups = plain_groups();
        assert_eq!(render(&groups, 4, 80), render(&groups, 4, 80));
    }
}
