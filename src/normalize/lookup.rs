//! Static lookup tables for school, degree and credential names, plus the
//! credential disambiguation tracks.
//!
//! Every table is scanned top to bottom and the first row whose alias
//! appears (word-bounded, case-insensitive) in the input wins. Unmatched
//! input is title-cased and passed through; these normalizers never reject.

use serde::{Deserialize, Serialize};

use crate::normalize::text::{contains_phrase, title_case};

type AliasRow = (&'static [&'static str], &'static str);

pub static SCHOOLS: &[AliasRow] = &[
    (&["mit", "massachusetts institute of technology"], "Massachusetts Institute of Technology"),
    (&["stanford"], "Stanford University"),
    (&["harvard"], "Harvard University"),
    (&["yale"], "Yale University"),
    (&["princeton"], "Princeton University"),
    (&["columbia"], "Columbia University"),
    (&["uc berkeley", "berkeley"], "University of California, Berkeley"),
    (&["ucla"], "University of California, Los Angeles"),
    (&["usc", "southern california"], "University of Southern California"),
    (&["nyu", "new york university"], "New York University"),
    (&["upenn", "penn", "wharton"], "University of Pennsylvania"),
    (&["cornell"], "Cornell University"),
    (&["brown"], "Brown University"),
    (&["dartmouth"], "Dartmouth College"),
    (&["duke"], "Duke University"),
    (&["georgetown"], "Georgetown University"),
    (&["northwestern"], "Northwestern University"),
    (&["uchicago", "university of chicago"], "University of Chicago"),
    (&["caltech"], "California Institute of Technology"),
    (&["cmu", "carnegie mellon"], "Carnegie Mellon University"),
    (&["georgia tech", "gatech"], "Georgia Institute of Technology"),
    (&["umich", "michigan"], "University of Michigan"),
    (&["ut austin", "texas"], "The University of Texas at Austin"),
    (&["unc", "chapel hill"], "University of North Carolina at Chapel Hill"),
    (&["uva", "virginia"], "University of Virginia"),
    (&["notre dame"], "University of Notre Dame"),
    (&["vanderbilt"], "Vanderbilt University"),
    (&["jhu", "johns hopkins"], "Johns Hopkins University"),
];

pub static DEGREES: &[AliasRow] = &[
    (&["phd", "ph d", "doctorate", "doctor of philosophy"], "Doctor of Philosophy (Ph.D.)"),
    (&["mba", "master of business administration"], "Master of Business Administration (MBA)"),
    (&["master", "masters", "ms", "ma", "msc", "m s", "m a"], "Master's Degree"),
    (&["bs", "bsc", "b s", "bachelor of science"], "Bachelor of Science (B.S.)"),
    (&["ba", "b a", "bachelor of arts"], "Bachelor of Arts (B.A.)"),
    (&["associate", "associates", "aa", "as", "aas"], "Associate's Degree"),
];

pub static CREDENTIALS: &[AliasRow] = &[
    (&["rn", "registered nurse"], "Registered Nurse (RN)"),
    (&["lpn", "licensed practical nurse"], "Licensed Practical Nurse (LPN)"),
    (&["np", "nurse practitioner"], "Nurse Practitioner (NP)"),
    (&["cna", "nursing assistant"], "Certified Nursing Assistant (CNA)"),
    (&["cpa", "certified public accountant"], "Certified Public Accountant (CPA)"),
    (&["cfa", "chartered financial analyst"], "Chartered Financial Analyst (CFA)"),
    (&["cfp", "financial planner"], "Certified Financial Planner (CFP)"),
    (&["series 7"], "FINRA Series 7"),
    (&["pe", "professional engineer"], "Professional Engineer (PE)"),
    (&["eit", "engineer in training"], "Engineer in Training (EIT)"),
    (&["pmp", "project management professional"], "Project Management Professional (PMP)"),
    (&["ccna"], "Cisco CCNA"),
    (&["cissp"], "CISSP"),
    (&["security"], "CompTIA Security+"),
    (&["aws", "solutions architect"], "AWS Certified Solutions Architect"),
    (&["cdl", "commercial driver"], "Commercial Driver's License (CDL)"),
    (&["realtor", "real estate salesperson"], "Real Estate Salesperson"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialTrack {
    Pilot,
    Nursing,
    RealEstate,
    Engineering,
    Financial,
    It,
    Driver,
}

impl CredentialTrack {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pilot => "pilot",
            Self::Nursing => "nursing",
            Self::RealEstate => "real_estate",
            Self::Engineering => "engineering",
            Self::Financial => "financial",
            Self::It => "it",
            Self::Driver => "driver",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        TRACKS
            .iter()
            .map(|track| track.track)
            .find(|track| track.as_str() == value)
    }

    pub fn definition(self) -> &'static TrackDefinition {
        // TRACKS holds exactly one row per variant.
        TRACKS
            .iter()
            .find(|row| row.track == self)
            .unwrap_or(&TRACKS[0])
    }
}

#[derive(Debug)]
pub struct TrackDefinition {
    pub track: CredentialTrack,
    pub keywords: &'static [&'static str],
    pub question: &'static str,
    pub options: &'static [&'static str],
}

pub static TRACKS: &[TrackDefinition] = &[
    TrackDefinition {
        track: CredentialTrack::Pilot,
        keywords: &["pilot", "faa", "aviation", "flight", "aircraft", "airman"],
        question: "Nice, which pilot certificate do you hold?",
        options: &[
            "Private Pilot (PPL)",
            "Commercial Pilot (CPL)",
            "Airline Transport Pilot (ATP)",
            "Certified Flight Instructor (CFI)",
            "Student Pilot",
        ],
    },
    TrackDefinition {
        track: CredentialTrack::Nursing,
        keywords: &["nurse", "nursing", "rn", "lpn", "cna"],
        question: "Which nursing credential is it?",
        options: &[
            "Registered Nurse (RN)",
            "Licensed Practical Nurse (LPN)",
            "Nurse Practitioner (NP)",
            "Certified Nursing Assistant (CNA)",
        ],
    },
    TrackDefinition {
        track: CredentialTrack::RealEstate,
        keywords: &["real estate", "realtor", "realty", "broker"],
        question: "Which real estate license do you hold?",
        options: &[
            "Real Estate Salesperson",
            "Real Estate Broker",
            "Property Manager",
        ],
    },
    TrackDefinition {
        track: CredentialTrack::Engineering,
        keywords: &["engineer", "engineering", "pe license", "fe exam"],
        question: "Which engineering credential is it?",
        options: &[
            "Professional Engineer (PE)",
            "Engineer in Training (EIT)",
            "Structural Engineer (SE)",
        ],
    },
    TrackDefinition {
        track: CredentialTrack::Financial,
        keywords: &["financial", "finance", "cpa", "accountant", "finra", "series 7", "cfa", "cfp"],
        question: "Which financial credential do you hold?",
        options: &[
            "Certified Public Accountant (CPA)",
            "Chartered Financial Analyst (CFA)",
            "Certified Financial Planner (CFP)",
            "FINRA Series 7",
        ],
    },
    TrackDefinition {
        track: CredentialTrack::It,
        keywords: &["it certification", "it cert", "aws", "azure", "cisco", "ccna", "comptia", "cissp"],
        question: "Which IT certification is it?",
        options: &[
            "AWS Certified Solutions Architect",
            "CompTIA Security+",
            "Cisco CCNA",
            "Microsoft Azure Administrator",
            "CISSP",
        ],
    },
    TrackDefinition {
        track: CredentialTrack::Driver,
        keywords: &["driver", "drivers", "driving", "cdl", "commercial driver"],
        question: "What kind of driver's license is it?",
        options: &[
            "Commercial Driver's License (CDL) Class A",
            "Commercial Driver's License (CDL) Class B",
            "Standard Driver's License",
            "Motorcycle Endorsement",
        ],
    },
];

fn lookup(table: &[AliasRow], input: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(aliases, _)| aliases.iter().any(|alias| contains_phrase(input, alias)))
        .map(|(_, canonical)| *canonical)
}

fn lookup_or_title_case(table: &[AliasRow], input: &str) -> String {
    lookup(table, input)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(input.trim()))
}

pub fn clean_school(input: &str) -> String {
    lookup_or_title_case(SCHOOLS, input)
}

pub fn clean_degree(input: &str) -> String {
    lookup_or_title_case(DEGREES, input)
}

pub fn clean_credential(input: &str) -> String {
    lookup_or_title_case(CREDENTIALS, input)
}

/// First track whose keyword appears in `input`, in table order.
pub fn detect_track(input: &str) -> Option<&'static TrackDefinition> {
    TRACKS
        .iter()
        .find(|row| row.keywords.iter().any(|kw| contains_phrase(input, kw)))
}

/// Resolves a reply to a closed-option question: a 1-based index, an exact
/// option label, or a label contained in the reply.
pub fn match_option(options: &[&'static str], reply: &str) -> Option<&'static str> {
    let trimmed = reply.trim();
    if let Ok(index) = trimmed.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    let lowered = trimmed.to_lowercase();
    options
        .iter()
        .find(|option| option.to_lowercase() == lowered)
        .or_else(|| options.iter().find(|option| contains_phrase(reply, option)))
        .or_else(|| options.iter().find(|option| contains_phrase(option, reply)))
        .copied()
}
