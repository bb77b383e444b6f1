//! Booking intake: form validation and WhatsApp hand-off.
//!
//! The studio takes orders over WhatsApp. A submitted booking form is
//! validated, its phone number normalized to a bare 10-digit Indian mobile
//! number, and the whole order is rendered into a pre-filled `wa.me` link the
//! customer opens to confirm. Submitted bookings are also appended to a local
//! JSON log for record keeping.
//!
//! ## Phone normalization
//!
//! Customers type numbers every which way: `+91 98765-43210`, `09876543210`,
//! `9876543210`. Normalization strips non-digits and a leading `91` country
//! code on 12-digit input; the result must be exactly 10 digits starting
//! with 6–9 (the Indian mobile range).

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const STUDIO_NAME: &str = "Rudransh Tailoring";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BookingError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("phone number must have at least 10 digits")]
    PhoneTooShort,
    #[error("invalid phone number format")]
    InvalidPhone,
    #[error("phone number must start with 6, 7, 8, or 9")]
    BadPhonePrefix,
}

/// A booking form as submitted by the website. Every field is optional on
/// the wire and defaults to empty; [`BookingForm::validate`] decides which
/// ones are actually required. Measurements are free-form strings in inches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub garment_type: String,
    pub style: String,
    pub bust: String,
    pub waist: String,
    pub hip: String,
    pub shoulder: String,
    pub arm_length: String,
    pub garment_length: String,
    pub sleeve_length: String,
    pub neck_depth: String,
    pub instructions: String,
    pub delivery_date: String,
}

/// A validated booking ready to hand off.
#[derive(Debug, Clone)]
pub struct ProcessedBooking {
    /// The form with its phone number normalized.
    pub form: BookingForm,
    pub whatsapp_url: String,
    pub message: String,
}

impl BookingForm {
    /// Check required fields and the phone number. Field checks run in form
    /// order so the caller surfaces the first problem a customer should fix.
    pub fn validate(&self) -> Result<(), BookingError> {
        let required: [(&str, &'static str); 4] = [
            (&self.name, "Name"),
            (&self.phone, "Phone"),
            (&self.address, "Address"),
            (&self.garment_type, "Garment Type"),
        ];
        for (value, label) in required {
            if value.trim().is_empty() {
                return Err(BookingError::MissingField(label));
            }
        }
        self.normalized_phone()?;
        Ok(())
    }

    /// The phone number as a bare 10-digit string.
    pub fn normalized_phone(&self) -> Result<String, BookingError> {
        let digits: String = self.phone.chars().filter(|c| c.is_ascii_digit()).collect();

        let digits = if digits.len() < 10 {
            return Err(BookingError::PhoneTooShort);
        } else if digits.len() == 10 {
            digits
        } else if digits.len() == 12 && digits.starts_with("91") {
            digits[2..].to_string()
        } else {
            return Err(BookingError::InvalidPhone);
        };

        if !matches!(digits.as_bytes()[0], b'6'..=b'9') {
            return Err(BookingError::BadPhonePrefix);
        }
        Ok(digits)
    }

    /// Render the order as the WhatsApp message the customer sends.
    pub fn whatsapp_message(&self) -> String {
        let now = Local::now().format("%d/%m/%Y, %I:%M:%S %p");

        let or = |value: &str, fallback: &str| -> String {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.trim().to_string()
            }
        };

        let mut message = format!(
            "*New Booking - {STUDIO_NAME}*\n\
             *Date:* {now}\n\
             \n\
             *Customer Details:*\n\
             👤 Name: {}\n\
             📞 Phone: {}\n\
             🏠 Address: {}\n\
             📧 Email: {}\n\
             \n\
             *Order Details:*\n\
             👗 Garment Type: {}\n\
             ✂️ Style/Design: {}\n\
             📏 Measurements:\n",
            or(&self.name, "N/A"),
            or(&self.phone, "N/A"),
            or(&self.address, "N/A"),
            or(&self.email, "Not provided"),
            or(&self.garment_type, "N/A"),
            or(&self.style, "Not specified"),
        );

        let measurements = [
            ("Bust", &self.bust),
            ("Waist", &self.waist),
            ("Hip", &self.hip),
            ("Shoulder", &self.shoulder),
            ("Arm Length", &self.arm_length),
            ("Garment Length", &self.garment_length),
            ("Sleeve Length", &self.sleeve_length),
            ("Neck Depth", &self.neck_depth),
        ];

        let mut any = false;
        for (label, value) in measurements {
            if !value.trim().is_empty() {
                message.push_str(&format!("   • {label}: {} inches\n", value.trim()));
                any = true;
            }
        }
        if !any {
            message.push_str("   • No measurements provided\n");
        }

        message.push_str(&format!(
            "\n\
             *Additional Info:*\n\
             📝 Special Instructions: {}\n\
             📅 Preferred Delivery: {}\n\
             \n\
             Thank you for choosing {STUDIO_NAME}! 🙏\n\
             Please confirm my booking.",
            or(&self.instructions, "None"),
            or(&self.delivery_date, "Not specified"),
        ));

        message
    }

    /// `https://wa.me/<studio number>?text=<urlencoded message>`
    pub fn whatsapp_url(&self, studio_number: &str) -> String {
        let message = self.whatsapp_message();
        let encoded = urlencoding::encode(&message);
        format!("https://wa.me/{studio_number}?text={encoded}")
    }

    /// Validate, normalize the phone in place, and build the hand-off.
    pub fn process(&self, studio_number: &str) -> Result<ProcessedBooking, BookingError> {
        self.validate()?;
        let mut form = self.clone();
        form.phone = self.normalized_phone()?;
        let message = form.whatsapp_message();
        let whatsapp_url = form.whatsapp_url(studio_number);
        Ok(ProcessedBooking {
            form,
            whatsapp_url,
            message,
        })
    }
}

/// One line of the booking log: the form plus bookkeeping stamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEntry {
    #[serde(flatten)]
    pub form: BookingForm,
    pub submitted_at: DateTime<Local>,
    pub status: String,
}

/// Append-only JSON log of submitted bookings.
///
/// Same persistence contract as the image index: a missing or corrupt log
/// reads as empty, and saves go through a temp file + rename.
pub struct BookingLog {
    path: PathBuf,
}

impl BookingLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append `form` to the log, stamped `submitted_at` + `status: pending`.
    pub fn record(&self, form: &BookingForm) -> io::Result<()> {
        let mut entries = self.load();
        entries.push(BookingEntry {
            form: form.clone(),
            submitted_at: Local::now(),
            status: "pending".to_string(),
        });

        let json = serde_json::to_string_pretty(&entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)
    }

    /// All logged bookings. Missing or corrupt log → empty.
    pub fn load(&self) -> Vec<BookingEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "unparseable booking log, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
