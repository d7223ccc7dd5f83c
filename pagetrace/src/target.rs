use std::{any, borrow::Cow, fmt};

/// Fully qualified name of a page type, e.g. `com.app.pages.Home` or
/// `shop::pages::Home`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageClass(Cow<'static, str>);

impl PageClass {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// The page class of a Rust type, named by its module path.
    pub fn of<T: ?Sized>() -> Self {
        Self(Cow::Borrowed(any::type_name::<T>()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for PageClass {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

/// A listener interface invoked on a component of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerInvocation {
    /// Id of the component the listener was invoked on.
    pub component_id: String,
    /// Name of the listener interface, e.g. `IFormSubmitListener`.
    pub interface: String,
}

impl ListenerInvocation {
    pub fn new(component_id: impl Into<String>, interface: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            interface: interface.into(),
        }
    }
}

/// The resolved destination a request is dispatched to.
///
/// Exactly one variant describes a request; there is no overlap between the
/// kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    /// A page reachable through a stable URL.
    BookmarkablePage { page_class: PageClass },
    /// An already instantiated page, optionally with a listener invoked on
    /// one of its components.
    Page {
        page_class: PageClass,
        listener: Option<ListenerInvocation>,
    },
    /// A single component rendered on its page.
    Component {
        page_class: PageClass,
        component_id: String,
    },
    /// Anything else: resources, redirects, static files.
    Other,
}

impl RequestTarget {
    pub fn bookmarkable_page(page_class: impl Into<PageClass>) -> Self {
        Self::BookmarkablePage {
            page_class: page_class.into(),
        }
    }

    pub fn page(page_class: impl Into<PageClass>) -> Self {
        Self::Page {
            page_class: page_class.into(),
            listener: None,
        }
    }

    pub fn listener(page_class: impl Into<PageClass>, listener: ListenerInvocation) -> Self {
        Self::Page {
            page_class: page_class.into(),
            listener: Some(listener),
        }
    }

    pub fn component(page_class: impl Into<PageClass>, component_id: impl Into<String>) -> Self {
        Self::Component {
            page_class: page_class.into(),
            component_id: component_id.into(),
        }
    }
}
