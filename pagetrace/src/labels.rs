//! Labels carrying the agent's browser timing header and footer.
//!
//! Attach the header label in the page `<head>`, after any `<meta>`
//! elements but before everything else. Attach the footer label just before
//! the closing `</body>` tag.
use std::{fmt, sync::Arc};

use pagetrace_agent::Agent;

/// Id of the label returned by [`browser_timing_header_label`].
pub const BROWSER_TIMING_HEADER_LABEL_ID: &str = "newRelicBrowserTimingHeader";

/// Id of the label returned by [`browser_timing_footer_label`].
pub const BROWSER_TIMING_FOOTER_LABEL_ID: &str = "newRelicBrowserTimingFooter";

type Model = Arc<dyn Fn() -> String + Send + Sync>;

/// A read-only text fragment bound to a model evaluated at render time.
#[derive(Clone)]
pub struct Label {
    id: &'static str,
    model: Model,
    escape_model_strings: bool,
}

impl Label {
    /// A label whose text is HTML escaped on render.
    pub fn new<F>(id: &'static str, model: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            id,
            model: Arc::new(model),
            escape_model_strings: true,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn escape_model_strings(&self) -> bool {
        self.escape_model_strings
    }

    pub fn set_escape_model_strings(&mut self, escape: bool) -> &mut Self {
        self.escape_model_strings = escape;
        self
    }

    /// Evaluates the model and returns the text to write into the page.
    pub fn render(&self) -> String {
        let text = (self.model)();
        if self.escape_model_strings {
            escape_markup(&text)
        } else {
            text
        }
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("id", &self.id)
            .field("escape_model_strings", &self.escape_model_strings)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// The browser timing header, fetched from `agent` on every render.
pub fn browser_timing_header_label(agent: &Arc<dyn Agent>) -> Label {
    let agent = Arc::clone(agent);
    let mut label = Label::new(BROWSER_TIMING_HEADER_LABEL_ID, move || {
        agent.browser_timing_header()
    });
    label.set_escape_model_strings(false);
    label
}

/// The browser timing footer, fetched from `agent` on every render.
pub fn browser_timing_footer_label(agent: &Arc<dyn Agent>) -> Label {
    let agent = Arc::clone(agent);
    let mut label = Label::new(BROWSER_TIMING_FOOTER_LABEL_ID, move || {
        agent.browser_timing_footer()
    });
    label.set_escape_model_strings(false);
    label
}

fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
