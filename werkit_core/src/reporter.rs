//! Display sink for command outcomes.

/// Where command results and failures are reported
pub trait Reporter {
    fn report(&mut self, message: &str);
    fn report_error(&mut self, message: &str);
}

/// Collects reported lines in memory
#[derive(Clone, Debug, Default)]
pub struct BufferReporter {
    pub messages: Vec<String>,
    pub errors: Vec<String>,
}

impl Reporter for BufferReporter {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn report_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
