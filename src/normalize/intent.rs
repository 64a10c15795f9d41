//! Keyword classifiers used before a session is authenticated.
//!
//! Both tables are ordered and first-match-wins. Several keywords overlap
//! across categories (`license` vs. `real estate`, `team` vs. `business`), so
//! extending a list can change which category an input lands in.

use serde::{Deserialize, Serialize};

use crate::normalize::text::{contains_phrase, mentions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    Auto,
    Property,
    Education,
    Credential,
    Pet,
    Business,
    Compliance,
}

impl Vertical {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Property => "property",
            Self::Education => "education",
            Self::Credential => "credential",
            Self::Pet => "pet",
            Self::Business => "business",
            Self::Compliance => "compliance",
        }
    }

    pub fn is_business(self) -> bool {
        matches!(self, Self::Business | Self::Compliance)
    }
}

pub static VERTICAL_KEYWORDS: &[(Vertical, &[&str])] = &[
    (
        Vertical::Auto,
        &["car", "vehicle", "truck", "auto", "vin", "motorcycle", "suv", "mileage"],
    ),
    (
        Vertical::Property,
        &["house", "home", "property", "real estate", "deed", "condo", "apartment"],
    ),
    (
        Vertical::Education,
        &["diploma", "degree", "school", "university", "college", "transcript", "graduat", "student"],
    ),
    (
        Vertical::Credential,
        &["license", "licence", "certification", "certificate", "credential", "certified"],
    ),
    (Vertical::Pet, &["pet", "dog", "cat", "puppy", "kitten", "breed"]),
    (
        Vertical::Business,
        &["business", "company", "inventory", "dealer", "fleet", "team"],
    ),
    (
        Vertical::Compliance,
        &["compliance", "audit", "regulat", "kyc"],
    ),
];

/// Keyword stems match at the start of a word (`cars`, `graduated`).
pub fn detect_vertical(input: &str) -> Option<Vertical> {
    VERTICAL_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| mentions(input, kw)))
        .map(|(vertical, _)| *vertical)
}

pub fn vertical_pitch(vertical: Vertical) -> &'static str {
    match vertical {
        Vertical::Auto => {
            "A Digital Title Certificate for your vehicle keeps the VIN, mileage and ownership history in one verified record. Want to start one?"
        }
        Vertical::Property => {
            "Property records are coming soon. You can open a free vault now and add vehicles, diplomas and licenses today."
        }
        Vertical::Education => {
            "Turn your diploma into a verified record employers can check in seconds. Want to add yours?"
        }
        Vertical::Credential => {
            "Professional licenses and certifications make great DTCs: one verified record with issuer, number and expiration. Want to add one?"
        }
        Vertical::Pet => {
            "Pet records are on the roadmap. In the meantime you can start a free vault for your other records."
        }
        Vertical::Business => {
            "Business workspaces let your team issue and track DTCs for inventory, staff credentials and compliance. Want to set one up?"
        }
        Vertical::Compliance => {
            "Every DTC carries an append-only logbook, so audits read straight from the record. Want to set up a business workspace?"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoTopic {
    Pricing,
    WhatIsThis,
    HowItWorks,
    Security,
    Verification,
    Greeting,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReply {
    pub topic: DemoTopic,
    pub message: &'static str,
    pub prompt_chips: &'static [&'static str],
}

static DEMO_KEYWORDS: &[(DemoTopic, &[&str])] = &[
    (
        DemoTopic::Pricing,
        &["price", "pricing", "cost", "costs", "how much", "free", "plan", "plans", "subscription", "pay"],
    ),
    (
        DemoTopic::WhatIsThis,
        &["what is this", "what's this", "what is a dtc", "what is dtc", "who are you", "what do you do", "dtc", "digital title"],
    ),
    (
        DemoTopic::HowItWorks,
        &["how does it work", "how does this work", "how it works", "how do i", "explain"],
    ),
    (
        DemoTopic::Security,
        &["secure", "security", "safe", "privacy", "private", "blockchain", "hack"],
    ),
    (
        DemoTopic::Verification,
        &["verify", "verified", "verification", "proof", "prove", "authentic"],
    ),
    (
        DemoTopic::Greeting,
        &["hi", "hello", "hey", "good morning", "good afternoon", "good evening"],
    ),
];

const START_CHIPS: &[&str] = &["Start free", "How does it work?", "What is a DTC?"];

/// Canned reply for unauthenticated visitors; always has a non-empty message.
pub fn demo_reply(input: &str) -> DemoReply {
    let topic = DEMO_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| contains_phrase(input, kw)))
        .map(|(topic, _)| *topic)
        .unwrap_or(DemoTopic::Fallback);

    let message = match topic {
        DemoTopic::Pricing => {
            "Personal vaults are free, including unlimited records and logbooks. Business workspaces are billed per seat after a 14-day trial. Want to start with a free vault?"
        }
        DemoTopic::WhatIsThis => {
            "A Digital Title Certificate (DTC) is a verified record of something you own or earned: a vehicle, a diploma, a license or a pilot certificate. Each one carries a logbook that only ever grows."
        }
        DemoTopic::HowItWorks => {
            "Tell me what you want to record, answer a few questions, confirm the details, and I mint a DTC into your vault. It takes about two minutes."
        }
        DemoTopic::Security => {
            "Records are attested by you before they are minted and can never be edited afterwards; new facts are appended to the logbook instead."
        }
        DemoTopic::Verification => {
            "Each DTC carries a fingerprint of its contents, and the logbook records when and by whom it was attested."
        }
        DemoTopic::Greeting => {
            "Hi! I can turn your car title, diploma or professional license into a verified digital record. What would you like to start with?"
        }
        DemoTopic::Fallback => {
            "I help you create verified records of vehicles, diplomas, licenses and pilot certificates. Start a free vault, or ask me how it works."
        }
    };

    DemoReply {
        topic,
        message,
        prompt_chips: START_CHIPS,
    }
}
