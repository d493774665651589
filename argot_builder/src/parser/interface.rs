use std::io::Write;

use crate::constant::{BELL, ERROR_PREFIX};

pub(crate) trait UserInterface {
    fn print(&self, message: String);
    fn print_error(&self, message: String);
    fn beep(&self);
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{ERROR_PREFIX}{message}");
    }

    fn beep(&self) {
        print!("{BELL}");
        // The bell is useless if it sits in the buffer until exit.
        let _ = std::io::stdout().flush();
    }
}

#[cfg(test)]
pub(crate) mod util {
    use crate::constant::{BELL, ERROR_PREFIX};
    use crate::parser::UserInterface;
    use std::sync::mpsc;

    pub(crate) fn channel_interface() -> (SenderInterface, ReceiverInterface) {
        let (message_tx, message_rx) = mpsc::channel();
        let (error_tx, error_rx) = mpsc::channel();
        let (beep_tx, beep_rx) = mpsc::channel();
        let sender = SenderInterface {
            message_tx,
            error_tx,
            beep_tx,
        };
        let receiver = ReceiverInterface {
            message_rx,
            error_rx,
            beep_rx,
        };
        (sender, receiver)
    }

    pub(crate) struct SenderInterface {
        message_tx: mpsc::Sender<Option<String>>,
        error_tx: mpsc::Sender<Option<String>>,
        beep_tx: mpsc::Sender<Option<String>>,
    }

    impl Drop for SenderInterface {
        fn drop(&mut self) {
            self.message_tx.send(None).unwrap();
            self.error_tx.send(None).unwrap();
            self.beep_tx.send(None).unwrap();
        }
    }

    impl UserInterface for SenderInterface {
        fn print(&self, message: String) {
            // Allows for print() to be called many times, with the receiver concatenating the messages.
            self.message_tx.send(Some(message)).unwrap();
        }

        fn print_error(&self, message: String) {
            self.error_tx
                .send(Some(format!("{ERROR_PREFIX}{message}")))
                .unwrap();
        }

        fn beep(&self) {
            self.beep_tx.send(Some(BELL.to_string())).unwrap();
        }
    }

    /// Receives everything the paired [`SenderInterface`] printed.
    /// Consuming blocks until the sender is dropped.
    pub(crate) struct ReceiverInterface {
        message_rx: mpsc::Receiver<Option<String>>,
        error_rx: mpsc::Receiver<Option<String>>,
        beep_rx: mpsc::Receiver<Option<String>>,
    }

    impl ReceiverInterface {
        pub(crate) fn consume(self) -> (Option<String>, Option<String>, usize) {
            let ReceiverInterface {
                message_rx,
                error_rx,
                beep_rx,
            } = self;

            (
                join(drain(message_rx)),
                join(drain(error_rx)),
                drain(beep_rx).len(),
            )
        }

        pub(crate) fn consume_message(self) -> String {
            let (message, error, beeps) = self.consume();
            assert_eq!(error, None);
            assert_eq!(beeps, 0);
            message.unwrap()
        }
    }

    fn drain(receiver: mpsc::Receiver<Option<String>>) -> Vec<String> {
        let mut values = Vec::default();

        while let Some(message) = receiver.recv().unwrap() {
            values.push(message);
        }

        values
    }

    fn join(values: Vec<String>) -> Option<String> {
        if values.is_empty() {
            None
        } else {
            Some(values.join("\n"))
        }
    }
}
