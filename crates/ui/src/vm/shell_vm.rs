use tutor_core::store::{Section, Store};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItemVm {
    pub section: Section,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellVm {
    pub nav: Vec<NavItemVm>,
    pub alert: Option<String>,
    pub loading: bool,
}

#[must_use]
pub fn render_shell(store: &Store) -> ShellVm {
    ShellVm {
        nav: Section::ALL
            .into_iter()
            .map(|section| NavItemVm {
                section,
                label: section.label(),
                active: section == store.section(),
            })
            .collect(),
        alert: store.alert().map(|alert| alert.message().to_string()),
        loading: store.is_loading(),
    }
}
