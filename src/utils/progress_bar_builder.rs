use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub(crate) struct ProgressBarBuilder {
    style_template: &'static str,
    message: String,
    length: Option<u64>,
    enable_tick: bool,
}

impl ProgressBarBuilder {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            style_template: "{spinner:.green} {msg}",
            message: message.into(),
            length: None,
            enable_tick: false,
        }
    }

    pub(crate) fn with_template(mut self, template: &'static str) -> Self {
        self.style_template = template;
        self
    }

    /// Counted bar instead of a spinner.
    pub(crate) fn with_length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    pub(crate) fn with_tick(mut self) -> Self {
        self.enable_tick = true;
        self
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let (pb, style) = match self.length {
            Some(length) => (ProgressBar::new(length), ProgressStyle::default_bar()),
            None => (ProgressBar::new_spinner(), ProgressStyle::default_spinner()),
        };

        pb.set_style(style.template(self.style_template)?);
        pb.set_message(self.message);

        if self.enable_tick {
            pb.enable_steady_tick(Duration::from_millis(250));
        }

        Ok(pb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_counted_bar() {
        let pb = ProgressBarBuilder::new("Reading")
            .with_template("{bar} {pos}/{len} {msg}")
            .with_length(7)
            .build()
            .unwrap();
        assert_eq!(pb.length(), Some(7));
        assert_eq!(pb.message(), "Reading");
    }
}
