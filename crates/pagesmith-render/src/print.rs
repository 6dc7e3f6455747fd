//! Printing through a transient browsing context.
//!
//! The host opens a blank window, the print document is written into it, and
//! the job then waits for two signals: the window finished loading (print
//! now) and printing finished (close now).

use crate::html::{HtmlLayout, render_document};
use pagesmith_core::Item;

/// Title of the print document.
pub const PRINT_TITLE: &str = "Template Print";

/// A freshly opened window the print document is written into.
pub trait PrintContext {
    /// Replace the window's document with `html`.
    fn write_document(&mut self, html: &str);
    /// Open the native print dialog.
    fn print(&mut self);
    /// Close the window.
    fn close(&mut self);
}

/// Host able to open blank browsing contexts.
pub trait PrintHost {
    type Context: PrintContext;

    /// Open a blank context; `None` when the host refuses (e.g. popup blocked).
    fn open_blank(&mut self) -> Option<Self::Context>;
}

/// Progress of a print job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintStage {
    /// Document written; waiting for the load signal.
    AwaitingLoad,
    /// Print dialog opened; waiting for the after-print signal.
    Printing,
    /// Context closed.
    Closed,
}

/// A print in flight. Feed it the host's load and after-print signals.
#[derive(Debug)]
pub struct PrintJob<C: PrintContext> {
    context: C,
    stage: PrintStage,
}

impl<C: PrintContext> PrintJob<C> {
    pub fn stage(&self) -> PrintStage {
        self.stage
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// The context finished loading: open the print dialog.
    pub fn on_load(&mut self) {
        if self.stage == PrintStage::AwaitingLoad {
            self.context.print();
            self.stage = PrintStage::Printing;
        }
    }

    /// Printing finished: close the context.
    pub fn on_after_print(&mut self) {
        if self.stage == PrintStage::Printing {
            self.context.close();
            self.stage = PrintStage::Closed;
            log::debug!("Print window closed");
        }
    }
}

/// Document written into the print window.
pub fn render_print_document(items: &[Item]) -> String {
    render_document(items, PRINT_TITLE, HtmlLayout::Print)
}

/// Start printing `items`.
///
/// Returns `None` without error when the host could not open a context.
pub fn print_template<H: PrintHost>(items: &[Item], host: &mut H) -> Option<PrintJob<H::Context>> {
    let Some(mut context) = host.open_blank() else {
        log::warn!("Print window could not be opened, skipping print");
        return None;
    };
    context.write_document(&render_print_document(items));
    Some(PrintJob {
        context,
        stage: PrintStage::AwaitingLoad,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[derive(Debug, Default)]
    struct RecordingContext {
        calls: Vec<String>,
    }

    impl PrintContext for RecordingContext {
        fn write_document(&mut self, html: &str) {
            self.calls.push(format!("write:{}", html.len()));
        }

        fn print(&mut self) {
            self.calls.push("print".to_string());
        }

        fn close(&mut self) {
            self.calls.push("close".to_string());
        }
    }

    struct Host {
        blocked: bool,
    }

    impl PrintHost for Host {
        type Context = RecordingContext;

        fn open_blank(&mut self) -> Option<RecordingContext> {
            (!self.blocked).then(RecordingContext::default)
        }
    }

    fn calls(job: &PrintJob<RecordingContext>) -> Vec<&str> {
        job.context().calls.iter().map(|c| c.split(':').next().unwrap_or(c)).collect()
    }

    #[test]
    fn test_blocked_window_is_skipped() {
        let items = [Item::text("A", "a", Point::ZERO)];
        assert!(print_template(&items, &mut Host { blocked: true }).is_none());
    }

    #[test]
    fn test_print_waits_for_load_and_close_waits_for_print() {
        let items = [Item::text("A", "a", Point::ZERO)];
        let mut job = print_template(&items, &mut Host { blocked: false }).unwrap();
        assert_eq!(job.stage(), PrintStage::AwaitingLoad);
        assert_eq!(calls(&job), vec!["write"]);

        // After-print before load does nothing.
        job.on_after_print();
        assert_eq!(calls(&job), vec!["write"]);

        job.on_load();
        assert_eq!(job.stage(), PrintStage::Printing);
        job.on_load();
        assert_eq!(calls(&job), vec!["write", "print"]);

        job.on_after_print();
        job.on_after_print();
        assert_eq!(job.stage(), PrintStage::Closed);
        assert_eq!(calls(&job), vec!["write", "print", "close"]);
    }

    #[test]
    fn test_print_document_escapes_items() {
        let html = render_print_document(&[Item::text("<b>x</b>", "k", Point::ZERO)]);
        assert!(html.contains("<title>Template Print</title>"));
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains("font-family: Arial, sans-serif;"));
    }
}
