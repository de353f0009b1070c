use crate::parser::{ErrorContext, RunError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_RIGHT_WIDTH: usize = 17;
pub(crate) const PADDING_WIDTH: usize = 3;

/// Lays out `left   right` rows, wrapping the right column.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ColumnRenderer {
    indent: usize,
    left: usize,
    right: usize,
}

impl ColumnRenderer {
    /// Produce a renderer whose right column fits within the total width, when one is known.
    pub(crate) fn guided(
        indent: usize,
        left: usize,
        right: usize,
        total_width: Option<usize>,
    ) -> Self {
        let right = match total_width {
            None => right,
            Some(total_width) => {
                let non_right = indent + left + PADDING_WIDTH;
                let target_total_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;

                if right + non_right <= target_total_width {
                    right
                } else {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Columns {non_right} and right {right} exceed the target total {target_total_width}.");
                    }

                    target_total_width.saturating_sub(non_right)
                }
            }
        };

        Self {
            indent,
            left,
            right: std::cmp::max(right, MINIMUM_RIGHT_WIDTH),
        }
    }

    pub(crate) fn render(&self, left: &str, right: &str) -> Vec<String> {
        let indent = self.indent;
        let left_width = self.left;
        let padding = PADDING_WIDTH;
        let mut out = Vec::default();

        for (i, part) in chunk(right, self.right).into_iter().enumerate() {
            let label = if i == 0 { left } else { "" };
            out.push(format!(
                "{:indent$}{label:left_width$}{:padding$}{part}",
                "", ""
            ));
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{left}", ""));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if !current.is_empty() {
            if current.chars().count() + word.chars().count() < width {
                current.push(' ');
                current.push_str(word);
                continue;
            }

            lines.push(std::mem::take(&mut current));
        }

        let mut pieces = hyphenate(word, width);
        current = pieces
            .pop()
            .expect("internal error - hyphenate must produce a piece");
        lines.extend(pieces);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(word: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::default();
    let mut rest: Vec<char> = word.chars().collect();

    while rest.len() > width {
        let tail = rest.split_off(width - 1);
        pieces.push(format!("{}-", rest.iter().collect::<String>()));
        rest = tail;
    }

    pieces.push(rest.into_iter().collect());
    pieces
}

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, error: &RunError);
    fn print_error_context(&self, error_context: ErrorContext);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, error: &RunError) {
        eprintln!("{error}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::parser::{ErrorContext, RunError, UserInterface};
    use std::cell::RefCell;
    use std::sync::mpsc;

    #[derive(Default)]
    pub(crate) struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        error: RefCell<Option<String>>,
        error_context: RefCell<Option<ErrorContext>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, error: &RunError) {
            // Assumes print_error() is only ever called once.
            self.error.borrow_mut().replace(error.to_string());
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            self.error_context.borrow_mut().replace(error_context);
        }
    }

    impl InMemoryInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let messages = self.messages.into_inner();
            let message = if messages.is_empty() {
                None
            } else {
                Some(messages.join("\n"))
            };

            (
                message,
                self.error.into_inner(),
                self.error_context.into_inner(),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap()
        }
    }

    /// An interface which may be handed off (boxed) to a command, with output read back from the receiver.
    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        let (error_context_tx, error_context_rx) = mpsc::channel();

        (
            SenderInterface {
                message_tx,
                error_tx,
                error_context_tx,
            },
            ReceiverInterface {
                message_rx,
                error_rx,
                error_context_rx,
            },
        )
    }

    pub(crate) struct SenderInterface {
        message_tx: mpsc::Sender<String>,
        error_tx: mpsc::Sender<String>,
        error_context_tx: mpsc::Sender<ErrorContext>,
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            self.message_tx.send(message).unwrap();
        }

        fn print_error(&self, error: &RunError) {
            self.error_tx.send(error.to_string()).unwrap();
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            self.error_context_tx.send(error_context).unwrap();
        }
    }

    pub(crate) struct ReceiverInterface {
        message_rx: mpsc::Receiver<String>,
        error_rx: mpsc::Receiver<String>,
        error_context_rx: mpsc::Receiver<ErrorContext>,
    }

    impl ReceiverInterface {
        /// Collect the output.
        /// Only valid once the sender has been dropped (ie: the command has run).
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, Option<ErrorContext>) {
            let ReceiverInterface {
                message_rx,
                error_rx,
                error_context_rx,
            } = self;

            (
                drain(message_rx),
                drain(error_rx),
                // Takes the first, if any.
                error_context_rx.try_iter().next(),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap()
        }
    }

    fn drain(receiver: mpsc::Receiver<String>) -> Option<String> {
        let values: Vec<String> = receiver.try_iter().collect();

        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }
}
