use terminal_size::{terminal_size, Width};

use crate::api::Converter;
use crate::parser::interface::UserInterface;
use crate::parser::{ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, RightWidth, TotalWidth};
use crate::signature::{CliSignature, Parameter};

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const DEFAULT_MIDDLE_WIDTH: usize = 17;
const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;
const CHOICE_INDENT: usize = 2;

// One entry of a help section, followed by the choices of its mapping (if any).
struct Row {
    left: String,
    help: String,
    meta: Vec<String>,
    choices: Vec<Row>,
}

impl Row {
    fn plain(left: impl Into<String>, help: Option<&str>) -> Self {
        Self {
            left: left.into(),
            help: help.unwrap_or_default().to_string(),
            meta: Vec::default(),
            choices: Vec::default(),
        }
    }

    fn parameter(left: impl Into<String>, parameter: &Parameter) -> Self {
        let mut row = Self::plain(left, parameter.help());

        if let Some(label) = parameter.type_label() {
            row.meta.push(format!("type: {label}"));
        }

        if let Some(default) = parameter.default() {
            row.meta.push(format!("default: {default}"));
        }

        if let Some(mapping) = parameter.converter().and_then(Converter::mapping) {
            row.choices = mapping
                .choices()
                .iter()
                .map(|c| {
                    Self::plain(
                        format!("{:CHOICE_INDENT$}{}", "", c.keys.join(", ")),
                        Some(c.help.as_str()),
                    )
                })
                .collect();
        }

        row
    }
}

/// Renders the help and mapped value listings of a single parse unit.
pub(crate) struct Printer {
    about: Option<String>,
    commands: Vec<(String, Option<String>)>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(None, Vec::default(), None)
    }

    pub(crate) fn terminal(about: Option<String>, commands: Vec<(String, Option<String>)>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(about, commands, terminal_width)
    }

    pub(crate) fn new(
        about: Option<String>,
        commands: Vec<(String, Option<String>)>,
        terminal_width: Option<usize>,
    ) -> Self {
        Self {
            about,
            commands,
            terminal_width,
        }
    }

    pub(crate) fn print_help(
        &self,
        program: &str,
        signature: &CliSignature,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let usage = signature.to_string();

        if usage.is_empty() {
            user_interface.print(format!("usage: {program}"));
        } else {
            user_interface.print(format!("usage: {program} {usage}"));
        }

        if let Some(about) = &self.about {
            user_interface.print("".to_string());
            user_interface.print(about.clone());
        }

        let positional: Vec<Row> = signature
            .positional()
            .filter(|p| p.is_documented())
            .map(|p| Row::parameter(p.grammar(), p))
            .collect();
        let options: Vec<Row> = signature
            .named
            .iter()
            .filter_map(|id| {
                let own = &signature.parameters[*id];

                if own.is_undocumented() || own.is_alternate() {
                    None
                } else {
                    let left = own
                        .aliases()
                        .iter()
                        .chain(own.negatives())
                        .cloned()
                        .collect::<Vec<String>>()
                        .join(", ");
                    Some(Row::parameter(left, signature.target(*id)))
                }
            })
            .collect();
        let actions: Vec<Row> = signature
            .alternate()
            .filter(|p| p.is_documented())
            .map(|p| Row::plain(p.aliases().join(", "), p.help()))
            .collect();
        let commands: Vec<Row> = self
            .commands
            .iter()
            .map(|(name, about)| Row::plain(name.clone(), about.as_deref()))
            .collect();
        let sections = [
            ("positional arguments:", positional),
            ("options:", options),
            ("other actions:", actions),
            ("commands:", commands),
        ];
        let column_renderer = self.renderer(sections.iter().flat_map(|(_, rows)| rows.iter()));

        for (header, rows) in &sections {
            if rows.is_empty() {
                continue;
            }

            user_interface.print("".to_string());
            user_interface.print(header.to_string());
            print_rows(&column_renderer, rows, user_interface);
        }
    }

    pub(crate) fn print_values(
        &self,
        signature: &CliSignature,
        parameter: &str,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let mapping = match signature
            .find(parameter)
            .and_then(|p| p.converter())
            .and_then(Converter::mapping)
        {
            Some(mapping) => mapping,
            None => unreachable!("internal error - only mapped parameters list their values"),
        };
        let rows: Vec<Row> = mapping
            .choices()
            .iter()
            .map(|c| Row::plain(c.keys.join(", "), Some(c.help.as_str())))
            .collect();
        let column_renderer = self.renderer(rows.iter());

        user_interface.print(format!("values for {parameter}:"));
        print_rows(&column_renderer, &rows, user_interface);
    }

    fn renderer<'r>(&self, rows: impl Iterator<Item = &'r Row>) -> ColumnRenderer {
        let mut left_column_width = 0;
        let mut middle_column_width = 0;
        let mut right_column_widths: Vec<usize> = Vec::default();

        for row in rows.flat_map(|r| std::iter::once(r).chain(r.choices.iter())) {
            left_column_width = std::cmp::max(left_column_width, row.left.len());
            middle_column_width = std::cmp::max(middle_column_width, row.help.len() + MAIN_INDENT);

            for (i, m) in row.meta.iter().enumerate() {
                if i >= right_column_widths.len() {
                    right_column_widths.push(m.len());
                } else if right_column_widths[i] < m.len() {
                    right_column_widths[i] = m.len();
                }
            }
        }

        let right_column_widths: Vec<RightWidth> = right_column_widths.into_iter().map(RightWidth::new).collect();

        match self.terminal_width {
            Some(total) => ColumnRenderer::guided(
                PaddingWidth::new(PADDING_WIDTH),
                LeftWidth::new(left_column_width),
                MiddleWidth::new(middle_column_width),
                right_column_widths,
                TotalWidth(total),
            ),
            None => ColumnRenderer::new(
                PaddingWidth::new(PADDING_WIDTH),
                LeftWidth::new(left_column_width),
                MiddleWidth::new(std::cmp::min(middle_column_width, DEFAULT_MIDDLE_WIDTH)),
                right_column_widths,
            ),
        }
    }
}

fn print_rows(column_renderer: &ColumnRenderer, rows: &[Row], user_interface: &(impl UserInterface + ?Sized)) {
    for row in rows {
        for line in column_renderer.render(MAIN_INDENT, &row.left, &row.help, &row.meta) {
            user_interface.print(line);
        }

        for choice in &row.choices {
            for line in column_renderer.render(MAIN_INDENT, &choice.left, &choice.help, &[]) {
                user_interface.print(line);
            }
        }
    }
}

/// The invocation tokens, with a caret under the offending one.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Projection {
    offset: usize,
    tokens: Vec<String>,
}

impl Projection {
    /// Point at the token at `position`, or past the end when there is none.
    pub(crate) fn new(position: Option<usize>, tokens: &[&str]) -> Self {
        let offset = tokens
            .iter()
            .take(position.unwrap_or(tokens.len()))
            .map(|t| t.len())
            .sum();

        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for Projection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens_length = 0;
        let mut projection = String::default();
        let mut spaces = 0;

        for (i, token) in self.tokens.iter().enumerate() {
            tokens_length += token.len();
            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push(' ');

                if tokens_length <= self.offset {
                    spaces += 1;
                }
            }
        }

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(self.offset, tokens_length.saturating_sub(1)) + spaces
        )
    }
}
