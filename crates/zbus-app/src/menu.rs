//! Mock menu tree.
//!
//! Static adjacency table from [`MenuId`] to its entries. Each entry either
//! navigates to another menu or emits a [`MockId`]. Every menu except the
//! root ends with a "back" entry pointing at its parent; that edge is the only
//! cycle, and since traversal follows discrete key presses it needs no
//! special handling.

use zbus_proto::MockId;

/// A menu in the mock tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuId {
    /// Root menu.
    Main,
    /// Pinpad categories.
    Pinpad,
    /// Printer mocks.
    Printer,
    /// Scanner mocks.
    Scanner,
    /// Pinpad card mocks.
    PinpadCard,
    /// Pinpad payment mocks.
    PinpadPayment,
    /// Other pinpad mocks.
    PinpadOther,
}

/// What selecting a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// Show another menu.
    Menu(MenuId),
    /// Load a mock event into the send form.
    Mock(MockId),
}

/// One selectable line of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// Text shown after the entry number.
    pub label: &'static str,
    /// Effect of selecting the entry.
    pub target: MenuTarget,
}

const fn menu(label: &'static str, id: MenuId) -> MenuEntry {
    MenuEntry { label, target: MenuTarget::Menu(id) }
}

const fn mock(label: &'static str, id: MockId) -> MenuEntry {
    MenuEntry { label, target: MenuTarget::Mock(id) }
}

const MAIN: &[MenuEntry] = &[
    menu("pinpad", MenuId::Pinpad),
    menu("printer", MenuId::Printer),
    menu("scanner", MenuId::Scanner),
];

const PINPAD: &[MenuEntry] = &[
    menu("card", MenuId::PinpadCard),
    menu("payment", MenuId::PinpadPayment),
    menu("other", MenuId::PinpadOther),
    menu("back", MenuId::Main),
];

const PRINTER: &[MenuEntry] = &[
    mock("connected", MockId::PrinterConnected),
    mock("disconnected", MockId::PrinterDisconnected),
    mock("drawer opened", MockId::PrinterDrawerOpened),
    mock("drawer closed", MockId::PrinterDrawerClosed),
    menu("back", MenuId::Main),
];

const SCANNER: &[MenuEntry] = &[
    mock("read", MockId::ScannerRead),
    mock("read PCI", MockId::ScannerReadPci),
    menu("back", MenuId::Main),
];

const PINPAD_CARD: &[MenuEntry] = &[
    mock("card inserted", MockId::PinpadCardInserted),
    mock("card read", MockId::PinpadCardInfo),
    mock("card read failed", MockId::PinpadCardReadError),
    mock("card declined", MockId::PinpadCardDeclined),
    mock("card removed", MockId::PinpadCardRemoved),
    menu("back", MenuId::Pinpad),
];

const PINPAD_PAYMENT: &[MenuEntry] = &[
    mock("finish transaction", MockId::PinpadFinishPaymentRequest),
    mock("payment accepted", MockId::PinpadPaymentAccepted),
    menu("back", MenuId::Pinpad),
];

const PINPAD_OTHER: &[MenuEntry] = &[
    mock("customer info request succeeded", MockId::PinpadCustomerInfoRequestSucceeded),
    mock("item displayed", MockId::PinpadDisplayItemSuccess),
    mock("item display failed", MockId::PinpadDisplayItemFailure),
    menu("back", MenuId::Pinpad),
];

impl MenuId {
    /// Menu shown on startup and after leaving Command mode.
    pub const ROOT: Self = Self::Main;

    /// Entries in display order.
    pub fn entries(self) -> &'static [MenuEntry] {
        match self {
            Self::Main => MAIN,
            Self::Pinpad => PINPAD,
            Self::Printer => PRINTER,
            Self::Scanner => SCANNER,
            Self::PinpadCard => PINPAD_CARD,
            Self::PinpadPayment => PINPAD_PAYMENT,
            Self::PinpadOther => PINPAD_OTHER,
        }
    }

    /// Entry for a 1-indexed digit key. `None` when out of range.
    pub fn select(self, digit: u32) -> Option<MenuTarget> {
        let index = usize::try_from(digit).ok()?.checked_sub(1)?;
        self.entries().get(index).map(|entry| entry.target)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL: [MenuId; 7] = [
        MenuId::Main,
        MenuId::Pinpad,
        MenuId::Printer,
        MenuId::Scanner,
        MenuId::PinpadCard,
        MenuId::PinpadPayment,
        MenuId::PinpadOther,
    ];

    #[test]
    fn every_non_root_menu_ends_with_back() {
        for id in ALL.into_iter().filter(|id| *id != MenuId::ROOT) {
            let last = id.entries().last().copied();
            assert!(
                matches!(last, Some(MenuEntry { label: "back", target: MenuTarget::Menu(_) })),
                "{id:?} has no back entry"
            );
        }
    }

    #[test]
    fn every_menu_fits_single_digit_selection() {
        for id in ALL {
            assert!((1..=9).contains(&id.entries().len()), "{id:?}");
        }
    }

    #[test]
    fn every_mock_is_reachable() {
        let reachable: HashSet<MockId> = ALL
            .iter()
            .flat_map(|id| id.entries())
            .filter_map(|entry| match entry.target {
                MenuTarget::Mock(mock) => Some(mock),
                MenuTarget::Menu(_) => None,
            })
            .collect();

        assert_eq!(reachable.len(), MockId::ALL.len());
    }

    #[test]
    fn select_is_one_indexed() {
        assert_eq!(MenuId::Main.select(1), Some(MenuTarget::Menu(MenuId::Pinpad)));
        assert_eq!(MenuId::Scanner.select(2), Some(MenuTarget::Mock(MockId::ScannerReadPci)));
        assert_eq!(MenuId::Main.select(0), None);
        assert_eq!(MenuId::Main.select(4), None);
    }
}
