use crate::error::ArgumentError;
use crate::parser::Projection;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    // Padding is at least 1.
    pub(crate) fn new(width: usize) -> Self {
        Self(std::cmp::max(width, 1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    // Left is at least 1.
    pub(crate) fn new(width: usize) -> Self {
        Self(std::cmp::max(width, 1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    // Middle is at least 2, so that words may be hyphenated.
    pub(crate) fn new(width: usize) -> Self {
        Self(std::cmp::max(width, 2))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RightWidth(usize);

impl RightWidth {
    // Right is at least 1.
    pub(crate) fn new(width: usize) -> Self {
        Self(std::cmp::max(width, 1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out rows of `left | middle | rights...` text, wrapping the middle column.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
    rights: Vec<RightWidth>,
}

// Leave a margin at the edge of the terminal.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Fits three words of average length 5, with spaces between.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer whose middle column is sized to fit the total width, when possible.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        rights: Vec<RightWidth>,
        total: TotalWidth,
    ) -> Self {
        let gaps = if rights.is_empty() { 1 } else { rights.len() + 1 };
        let non_middle = left.0 + rights.iter().map(|r| r.0).sum::<usize>() + (gaps * padding.0);
        let target = (total.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let wanted = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);
        let chosen = if wanted + non_middle <= target {
            wanted
        } else {
            std::cmp::max(total.0.saturating_sub(non_middle), MINIMUM_MIDDLE_WIDTH)
        };

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} against total {}.  Selecting middle: {chosen}.", total.0);
        }

        Self::new(padding, left, MiddleWidth(chosen), rights)
    }

    pub(crate) fn new(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        rights: Vec<RightWidth>,
    ) -> Self {
        Self {
            padding,
            left,
            middle,
            rights,
        }
    }

    /// Render one row, producing as many lines as the middle column needs.
    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str, rights: &[String]) -> Vec<String> {
        assert!(rights.len() <= self.rights.len());
        let padding = " ".repeat(self.padding.0);
        let left_width = self.left.0;
        assert!(left.len() <= left_width);
        let middle_width = std::cmp::max(self.middle.0.saturating_sub(indent), 2);
        let mut right = String::default();

        for (i, item) in rights.iter().enumerate() {
            let width = self.rights[i].0;
            assert!(item.len() <= width);
            right.push_str(&padding);

            if i + 1 < rights.len() {
                right.push_str(&format!("{item:width$}"));
            } else {
                right.push_str(item);
            }
        }

        let parts = chunk(middle, middle_width);
        let mut lines = Vec::default();

        for (i, part) in parts.iter().enumerate() {
            let label = if i == 0 { left } else { "" };

            if i == 0 && !right.is_empty() {
                lines.push(format!(
                    "{:indent$}{label:left_width$}{padding}{part:middle_width$}{right}",
                    ""
                ));
            } else {
                lines.push(format!("{:indent$}{label:left_width$}{padding}{part}", ""));
            }
        }

        if lines.is_empty() {
            if right.is_empty() {
                lines.push(format!("{:indent$}{left}", ""));
            } else {
                lines.push(format!(
                    "{:indent$}{left:left_width$}{padding}{:middle_width$}{right}",
                    "", ""
                ));
            }
        }

        lines
    }
}

// Greedily pack words into lines of at most `width` characters.
fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        let length = word.chars().count();

        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + length < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Split a word which is longer than the line, leaving its tail in `current`.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let step = width - 1;
    let mut start = 0;

    while characters.len() - start > width {
        let piece: String = characters[start..start + step].iter().collect();
        lines.push(format!("{piece}-"));
        start += step;
    }

    current.extend(&characters[start..]);
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: ArgumentError);
    fn print_error_context(&self, projection: Projection);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: ArgumentError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, projection: Projection) {
        eprintln!("{projection}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::error::ArgumentError;
    use crate::parser::{Projection, UserInterface};
    use std::cell::RefCell;
    use std::sync::mpsc;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        error: RefCell<Option<String>>,
        projection: RefCell<Option<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, error: ArgumentError) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, projection: Projection) {
            // Assumes print_error_context() is only ever called once.
            self.projection.borrow_mut().replace(projection.to_string());
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, Option<String>) {
            let InMemoryInterface {
                messages,
                error,
                projection,
            } = self;
            let messages = messages.into_inner();

            (
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("\n"))
                },
                error.into_inner(),
                projection.into_inner(),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, projection) = self.consume();
            assert_eq!(error, None);
            assert_eq!(projection, None);
            message.unwrap()
        }
    }

    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        let (projection_tx, projection_rx) = mpsc::channel();

        (
            SenderInterface {
                message_tx,
                error_tx,
                projection_tx,
            },
            ReceiverInterface {
                message_rx,
                error_rx,
                projection_rx,
            },
        )
    }

    pub(crate) struct SenderInterface {
        message_tx: mpsc::Sender<Option<String>>,
        error_tx: mpsc::Sender<Option<String>>,
        projection_tx: mpsc::Sender<Option<String>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            self.message_tx.send(None).unwrap();
            self.error_tx.send(None).unwrap();
            self.projection_tx.send(None).unwrap();
        }
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            self.message_tx.send(Some(message)).unwrap();
        }

        fn print_error(&self, error: ArgumentError) {
            self.error_tx.send(Some(error.to_string())).unwrap();
        }

        fn print_error_context(&self, projection: Projection) {
            self.projection_tx.send(Some(projection.to_string())).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        message_rx: mpsc::Receiver<Option<String>>,
        error_rx: mpsc::Receiver<Option<String>>,
        projection_rx: mpsc::Receiver<Option<String>>,
    }

    impl ReceiverInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, Option<String>) {
            (
                drain(self.message_rx),
                drain(self.error_rx),
                drain(self.projection_rx),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, projection) = self.consume();
            assert_eq!(error, None);
            assert_eq!(projection, None);
            message.unwrap()
        }
    }

    // Collect everything sent until the sender is dropped.
    fn drain(receiver: mpsc::Receiver<Option<String>>) -> Option<String> {
        let mut values = Vec::default();

        while let Some(message) = receiver.recv().unwrap() {
            values.push(message);
        }

        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn renderer(middle: usize, rights: Vec<usize>) -> ColumnRenderer {
        ColumnRenderer::new(
            PaddingWidth::new(3),
            LeftWidth::new(6),
            MiddleWidth::new(middle),
            rights.into_iter().map(RightWidth::new).collect(),
        )
    }

    #[rstest]
    #[case("one", "the help", vec!["one      the help"])]
    #[case("one", "  the   help  ", vec!["one      the help"])]
    #[case("--long", "the help message", vec!["--long   the help message"])]
    #[case("one", "the help message wraps around", vec!["one      the help message", "         wraps around"])]
    #[case("one", "", vec!["one"])]
    fn render(#[case] left: &str, #[case] middle: &str, #[case] expected: Vec<&str>) {
        let cr = renderer(16, vec![]);

        assert_eq!(cr.render(0, left, middle, &[]), expected);
    }

    #[test]
    fn render_rights() {
        let cr = renderer(10, vec![9, 12]);
        let rights = vec!["type: INT".to_string(), "default: 3".to_string()];

        assert_eq!(
            cr.render(1, "-n", "how many repeats", &rights),
            vec![
                " -n       how many    type: INT   default: 3",
                "          repeats",
            ]
        );
        assert_eq!(
            cr.render(1, "-n", "", &rights[..1]),
            vec![" -n                   type: INT"]
        );
    }

    #[test]
    fn render_hyphenate() {
        let cr = renderer(8, vec![]);

        assert_eq!(
            cr.render(0, "x", "abcdefghijklmnopq", &[]),
            vec!["x        abcdefg-", "         hijklmn-", "         opq"]
        );
        assert_eq!(
            cr.render(0, "x", "ab éééééééééé", &[]),
            vec!["x        ab", "         ééééééé-", "         ééé"]
        );
    }

    #[test]
    #[should_panic]
    fn render_left_overflow() {
        renderer(10, vec![]).render(0, "abcdefg", "help", &[]);
    }

    #[test]
    #[should_panic]
    fn render_too_many_rights() {
        renderer(10, vec![3]).render(0, "a", "help", &["x".to_string(), "y".to_string()]);
    }

    #[rstest]
    // Too narrow for anything.
    #[case(2, 7, MINIMUM_MIDDLE_WIDTH)]
    // Too narrow for the requested middle.
    #[case(MINIMUM_MIDDLE_WIDTH + 1, 15, MINIMUM_MIDDLE_WIDTH)]
    #[case(MINIMUM_MIDDLE_WIDTH + 2, 27, MINIMUM_MIDDLE_WIDTH + 3)]
    // Wide enough.
    #[case(MINIMUM_MIDDLE_WIDTH, 26, MINIMUM_MIDDLE_WIDTH)]
    #[case(MINIMUM_MIDDLE_WIDTH + 1, 27, MINIMUM_MIDDLE_WIDTH + 1)]
    #[case(MINIMUM_MIDDLE_WIDTH + 10, 50, MINIMUM_MIDDLE_WIDTH + 10)]
    fn guided(#[case] middle: usize, #[case] total: usize, #[case] expected: usize) {
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2),
            LeftWidth::new(5),
            MiddleWidth::new(middle),
            vec![],
            TotalWidth(total),
        );

        assert_eq!(cr.middle.0, expected);
    }

    #[test]
    fn guided_rights() {
        let cr = ColumnRenderer::guided(
            PaddingWidth::new(2),
            LeftWidth::new(5),
            MiddleWidth::new(MINIMUM_MIDDLE_WIDTH + 1),
            vec![RightWidth::new(1)],
            TotalWidth(30),
        );

        assert_eq!(cr.middle.0, MINIMUM_MIDDLE_WIDTH + 1);
    }
}
