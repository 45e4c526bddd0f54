//! Canned hardware events.
//!
//! Each [`MockId`] names one behavior of a pinpad, printer or scanner and maps
//! to a template [`Event`]. Templates carry no request or authorization ids;
//! those are injected at use time by [`Event::from_mock`].

use serde_json::{Value, json};

use crate::Event;

/// A mockable hardware event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MockId {
    /// Pinpad reports the card was declined.
    PinpadCardDeclined,
    /// Pinpad reports card details after a successful read.
    PinpadCardInfo,
    /// Pinpad reports a card was inserted.
    PinpadCardInserted,
    /// Pinpad failed to read the card.
    PinpadCardReadError,
    /// Pinpad reports the card was removed.
    PinpadCardRemoved,
    /// Pinpad collected customer info.
    PinpadCustomerInfoRequestSucceeded,
    /// Pinpad failed to display an item.
    PinpadDisplayItemFailure,
    /// Pinpad displayed an item.
    PinpadDisplayItemSuccess,
    /// Pinpad asks the POS to finish the payment.
    PinpadFinishPaymentRequest,
    /// Pinpad accepted the payment.
    PinpadPaymentAccepted,
    /// Printer came online.
    PrinterConnected,
    /// Printer went offline.
    PrinterDisconnected,
    /// Cash drawer closed.
    PrinterDrawerClosed,
    /// Cash drawer opened.
    PrinterDrawerOpened,
    /// Scanner read a barcode.
    ScannerRead,
    /// Scanner read a PCI barcode.
    ScannerReadPci,
}

impl MockId {
    /// Every mock, in catalog order.
    pub const ALL: [Self; 16] = [
        Self::PinpadCardDeclined,
        Self::PinpadCardInfo,
        Self::PinpadCardInserted,
        Self::PinpadCardReadError,
        Self::PinpadCardRemoved,
        Self::PinpadCustomerInfoRequestSucceeded,
        Self::PinpadDisplayItemFailure,
        Self::PinpadDisplayItemSuccess,
        Self::PinpadFinishPaymentRequest,
        Self::PinpadPaymentAccepted,
        Self::PrinterConnected,
        Self::PrinterDisconnected,
        Self::PrinterDrawerClosed,
        Self::PrinterDrawerOpened,
        Self::ScannerRead,
        Self::ScannerReadPci,
    ];

    /// Template event for this mock, without request or authorization ids.
    pub fn template(self) -> Event {
        match self {
            Self::PinpadCardDeclined => Event::new("pinpad.paymentError", card_info(), ""),
            Self::PinpadCardInfo => Event::new("pinpad.cardInfo", card_info(), ""),
            Self::PinpadCardInserted => Event::new("pinpad.cardInserted", Value::Null, ""),
            Self::PinpadCardReadError => Event::new("pinpad.cardReadError", card_info(), ""),
            Self::PinpadCardRemoved => Event::new("pinpad.cardRemoved", Value::Null, ""),
            Self::PinpadCustomerInfoRequestSucceeded => Event::new(
                "pinpad.customerInfoRequestSucceeded",
                Value::String(CUSTOMER_INFO.to_owned()),
                "",
            ),
            Self::PinpadDisplayItemFailure => {
                Event::new("pinpad.displayItemFailure", Value::Null, "")
            },
            Self::PinpadDisplayItemSuccess => {
                Event::new("pinpad.displayItemSuccess", Value::Null, "")
            },
            Self::PinpadFinishPaymentRequest => {
                Event::new("pinpad.finishPaymentRequest", Value::Null, "")
            },
            Self::PinpadPaymentAccepted => Event::new("pinpad.paymentAccepted", card_info(), ""),
            Self::PrinterConnected | Self::PrinterDrawerClosed => {
                Event::new("printer.stateUpdate", printer_state(true, false), "")
            },
            Self::PrinterDisconnected => {
                Event::new("printer.stateUpdate", printer_state(false, false), "")
            },
            Self::PrinterDrawerOpened => {
                Event::new("printer.stateUpdate", printer_state(true, true), "")
            },
            Self::ScannerRead => Event::new("scanner.read", Value::Null, ""),
            Self::ScannerReadPci => Event::new("scanner.read", Value::String(PCI.to_owned()), ""),
        }
    }
}

/// Deliberately not valid JSON; the bus sees it as a plain string.
const CUSTOMER_INFO: &str = "{receiptPreference: 'PAPER'}";

const PCI: &str = "900100<STORE_NUMBER><KPCOUNTER_ID>";

fn card_info() -> Value {
    json!({
        "cardInfo": {
            "accountNumber": "374245XXXXX1337",
            "aid": "A000000025010801",
            "amount": "319.2",
            "appName": "AMERICAN EXPRESS",
            "approvalMethod": "AUTOMATIC",
            "approvalNumber": "123456",
            "arqc": "",
            "cardProvider": "AMEX",
            "entryMethod": "CHIP",
            "expirationDate": "0321",
            "pinVerified": "PIN Blocked",
            "ps2000": " 500               =    = 5533         N",
            "sequenceNumber": "00",
            "tc": "3BA276CB9E0F174E"
        }
    })
}

fn printer_state(till_connected: bool, till_open: bool) -> Value {
    json!({
        "documentStationSelected": false,
        "feedError": false,
        "frontDocumentSensor": false,
        "isPrintingReceipt": false,
        "isReadingCheck": false,
        "outOfPaper": false,
        "ribbonCoverOpen": false,
        "tillIsConnected": till_connected,
        "tillIsOpen": till_open,
        "topDocumentSensor": false
    })
}
