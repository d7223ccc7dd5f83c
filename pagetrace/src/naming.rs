use crate::target::{PageClass, RequestTarget};

/// Derives transaction names from request targets.
///
/// A page class is shortened by the package prefix and its path separators
/// (`.` or `::`) become `/`. The name of a target is that path behind a
/// leading `/`, followed by the component id and listener interface where
/// the target has them.
#[derive(Debug, Clone)]
pub struct TransactionNamer {
    package_prefix: String,
}

impl TransactionNamer {
    pub fn new(package_prefix: impl Into<String>) -> Self {
        Self {
            package_prefix: package_prefix.into(),
        }
    }

    pub fn pathize(&self, page_class: &PageClass) -> String {
        let name = page_class.name();
        let name = name.strip_prefix(self.package_prefix.as_str()).unwrap_or(name);
        name.replace("::", "/").replace('.', "/")
    }

    /// The transaction name for `target`, or `None` when the target is not
    /// a page, listener or component and the transaction should be ignored.
    pub fn name(&self, target: &RequestTarget) -> Option<String> {
        let mut name = String::from("/");
        match target {
            RequestTarget::BookmarkablePage { page_class } => {
                self.push_page(&mut name, page_class);
            }
            RequestTarget::Page {
                page_class,
                listener,
            } => {
                self.push_page(&mut name, page_class);
                if let Some(listener) = listener {
                    name.push('/');
                    name.push_str(&listener.component_id);
                    name.push('/');
                    name.push_str(&listener.interface);
                }
            }
            RequestTarget::Component {
                page_class,
                component_id,
            } => {
                self.push_page(&mut name, page_class);
                name.push('/');
                name.push_str(component_id);
            }
            RequestTarget::Other => return None,
        }
        Some(name)
    }

    // A prefix given without its trailing separator leaves one in front of
    // the path; the leading `/` is already there.
    fn push_page(&self, name: &mut String, page_class: &PageClass) {
        let path = self.pathize(page_class);
        name.push_str(path.strip_prefix('/').unwrap_or(&path));
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::TransactionNamer;
    use crate::target::{ListenerInvocation, PageClass, RequestTarget};

    mod pages {
        pub struct Checkout;
    }

    #[rstest]
    #[case::prefix_stripped("com.app.pages", "com.app.pages.admin.Users", "/admin/Users")]
    #[case::prefix_with_separator("com.app.pages.", "com.app.pages.Home", "Home")]
    #[case::prefix_not_matching("com.app.pages", "org.other.Home", "org/other/Home")]
    #[case::empty_prefix("", "com.app.Home", "com/app/Home")]
    #[case::rust_path("shop::pages", "shop::pages::cart::Checkout", "/cart/Checkout")]
    // `::` is a separator even outside the prefix.
    #[case::rust_path_not_matching("com.app.pages", "vendor::widgets::Grid", "vendor/widgets/Grid")]
    fn pathize(#[case] prefix: &str, #[case] class: &'static str, #[case] path: &str) {
        let namer = TransactionNamer::new(prefix);
        assert_eq!(namer.pathize(&PageClass::new(class)), path);
    }

    #[rstest]
    #[case::bookmarkable(RequestTarget::bookmarkable_page("com.app.pages.Home"), "/Home")]
    #[case::page(RequestTarget::page("com.app.pages.account.Profile"), "/account/Profile")]
    #[case::listener(
        RequestTarget::listener(
            "com.app.pages.Edit",
            ListenerInvocation::new("submitBtn", "IFormSubmitListener"),
        ),
        "/Edit/submitBtn/IFormSubmitListener"
    )]
    #[case::component(RequestTarget::component("com.app.pages.List", "row-3"), "/List/row-3")]
    #[case::foreign_page(RequestTarget::page("org.vendor.Login"), "/org/vendor/Login")]
    fn names_targets(#[case] target: RequestTarget, #[case] name: &str) {
        let namer = TransactionNamer::new("com.app.pages");
        assert_eq!(namer.name(&target).as_deref(), Some(name));
    }

    #[test]
    fn separator_in_prefix_gives_same_name() {
        let target = RequestTarget::bookmarkable_page("com.app.pages.Home");
        assert_eq!(
            TransactionNamer::new("com.app.pages.").name(&target),
            TransactionNamer::new("com.app.pages").name(&target),
        );
    }

    #[test]
    fn only_one_leading_separator_is_absorbed() {
        let namer = TransactionNamer::new("com.app");
        let target = RequestTarget::page("com.app..pages.Home");
        assert_eq!(namer.name(&target).as_deref(), Some("//pages/Home"));
    }

    #[test]
    fn other_target_has_no_name() {
        let namer = TransactionNamer::new("com.app.pages");
        assert_eq!(namer.name(&RequestTarget::Other), None);
    }

    #[test]
    fn names_rust_page_types() {
        let namer = TransactionNamer::new(module_path!());
        let target = RequestTarget::bookmarkable_page(PageClass::of::<pages::Checkout>());
        assert_eq!(namer.name(&target).as_deref(), Some("/pages/Checkout"));
    }
}
