//! Profile dropdown menu as an explicit state machine.

/// Entries of the profile menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Profile,
    SignOut,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Profile, MenuItem::SignOut];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Profile => "Profile",
            MenuItem::SignOut => "Sign out",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open {
        /// Index into [`MenuItem::ALL`].
        highlighted: usize,
    },
}

/// What the rendering layer may do with a dropdown.
pub trait Dropdown {
    type Item: Copy;

    fn is_open(&self) -> bool;
    fn open(&mut self);
    fn close(&mut self);
    /// Choose `item`. Closes the menu and returns the item; does nothing while closed.
    fn select_item(&mut self, item: Self::Item) -> Option<Self::Item>;
    /// Item under the keyboard highlight, if open.
    fn highlighted(&self) -> Option<Self::Item>;
}

#[derive(Debug, Clone, Default)]
pub struct ProfileMenu {
    state: MenuState,
}

impl ProfileMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn highlight_next(&mut self) {
        if let MenuState::Open { highlighted } = &mut self.state {
            *highlighted = (*highlighted + 1) % MenuItem::ALL.len();
        }
    }

    pub fn highlight_previous(&mut self) {
        if let MenuState::Open { highlighted } = &mut self.state {
            *highlighted = highlighted
                .checked_sub(1)
                .unwrap_or(MenuItem::ALL.len() - 1);
        }
    }

    /// Select the highlighted item (Enter).
    pub fn activate(&mut self) -> Option<MenuItem> {
        let item = self.highlighted()?;
        self.select_item(item)
    }
}

impl Dropdown for ProfileMenu {
    type Item = MenuItem;

    fn is_open(&self) -> bool {
        matches!(self.state, MenuState::Open { .. })
    }

    fn open(&mut self) {
        if !self.is_open() {
            self.state = MenuState::Open { highlighted: 0 };
        }
    }

    fn close(&mut self) {
        self.state = MenuState::Closed;
    }

    fn select_item(&mut self, item: MenuItem) -> Option<MenuItem> {
        if !self.is_open() {
            return None;
        }
        self.state = MenuState::Closed;
        Some(item)
    }

    fn highlighted(&self) -> Option<MenuItem> {
        match self.state {
            MenuState::Open { highlighted } => MenuItem::ALL.get(highlighted).copied(),
            MenuState::Closed => None,
        }
    }
}

/// Identity shown in the profile menu. Supplied by the identity provider; never verified here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(email: Option<String>) -> Self {
        Self {
            email: email.filter(|e| !e.trim().is_empty()),
        }
    }

    /// Avatar letter: first character of the e-mail, uppercased, or `?`.
    pub fn initial(&self) -> String {
        self.email
            .as_deref()
            .and_then(|e| e.chars().next())
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or("Unknown User")
    }
}
