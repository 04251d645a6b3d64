use std::fmt;

use mongodb::bson::DateTime;

use crate::models::booking::{Booking, BookingStatus, PaymentStatus};

#[derive(Debug, PartialEq)]
pub enum TransitionError {
    InvalidStatus {
        from: BookingStatus,
        to: BookingStatus,
    },
    InvalidPaymentStatus {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    PaymentOnTerminalBooking {
        status: BookingStatus,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::InvalidStatus { from, to } => {
                write!(f, "invalid booking transition: {} -> {}", from.as_str(), to.as_str())
            }
            TransitionError::InvalidPaymentStatus { from, to } => {
                write!(f, "invalid payment transition: {} -> {}", from.as_str(), to.as_str())
            }
            TransitionError::PaymentOnTerminalBooking { status } => {
                write!(f, "cannot capture payment for a {} booking", status.as_str())
            }
        }
    }
}

/// Booking lifecycle table. `cancelled` and `completed` are terminal.
pub fn status_allowed(from: BookingStatus, to: BookingStatus) -> bool {
    matches!(
        (from, to),
        (BookingStatus::Pending, BookingStatus::Confirmed)
            | (BookingStatus::Pending, BookingStatus::Cancelled)
            | (BookingStatus::Confirmed, BookingStatus::Completed)
            | (BookingStatus::Confirmed, BookingStatus::Cancelled)
    )
}

/// Payment table. A refund requires a prior `paid`; `failed` can be retried
/// back to `pending`.
pub fn payment_allowed(from: PaymentStatus, to: PaymentStatus) -> bool {
    matches!(
        (from, to),
        (PaymentStatus::Pending, PaymentStatus::Paid)
            | (PaymentStatus::Pending, PaymentStatus::Failed)
            | (PaymentStatus::Failed, PaymentStatus::Pending)
            | (PaymentStatus::Paid, PaymentStatus::Refunded)
            | (PaymentStatus::Paid, PaymentStatus::PartiallyRefunded)
    )
}

/// Apply a requested status and/or payment-status change. Both requested
/// changes are validated before anything mutates, so a rejected transition
/// leaves the booking untouched.
pub fn transition(
    booking: &mut Booking,
    status: Option<BookingStatus>,
    payment_status: Option<PaymentStatus>,
) -> Result<(), TransitionError> {
    if let Some(to) = status {
        if !status_allowed(booking.status, to) {
            return Err(TransitionError::InvalidStatus {
                from: booking.status,
                to,
            });
        }
    }
    if let Some(to) = payment_status {
        if !payment_allowed(booking.payment_status, to) {
            return Err(TransitionError::InvalidPaymentStatus {
                from: booking.payment_status,
                to,
            });
        }
        // A cancelled or completed booking can still be refunded, but money
        // must never be captured for one.
        if to == PaymentStatus::Paid && status.is_none() && booking.status.is_terminal() {
            return Err(TransitionError::PaymentOnTerminalBooking {
                status: booking.status,
            });
        }
    }

    if let Some(to) = status {
        booking.status = to;
    }
    if let Some(to) = payment_status {
        booking.payment_status = to;
    }
    booking.updated_at = Some(DateTime::now());

    Ok(())
}
