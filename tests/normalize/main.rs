use dtc_onboard::normalize::{
    CredentialTrack, DemoTopic, MileageError, VinError, Vertical, YearError, clean_credential,
    clean_degree, clean_school, clean_vin, clean_year, demo_reply, detect_track, detect_vertical,
    extract_email, is_affirmative, is_negative, is_vin_skip, match_option, parse_flight_hours,
    parse_mileage, parse_name, parse_ratings, validate_vin,
};

const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

fn vin_from_seed(seed: usize) -> String {
    (0..17)
        .map(|i| VIN_ALPHABET[(seed * 31 + i * 7) % VIN_ALPHABET.len()] as char)
        .collect()
}

#[test]
fn given_vins_over_allowed_alphabet_when_validated_then_all_pass() {
    for seed in 0..200 {
        let vin = vin_from_seed(seed);
        assert_eq!(validate_vin(&vin), Ok(()), "vin {vin}");
    }
}

#[test]
fn given_seventeen_chars_with_forbidden_letter_when_validated_then_invalid_characters() {
    for forbidden in ['I', 'O', 'Q', 'a', '-', '*'] {
        let mut vin = vin_from_seed(3);
        vin.replace_range(8..9, &forbidden.to_string());
        assert_eq!(vin.chars().count(), 17);
        assert_eq!(validate_vin(&vin), Err(VinError::InvalidCharacters), "vin {vin}");
    }
}

#[test]
fn given_wrong_length_when_validated_then_length_error() {
    for len in [0, 1, 16, 18, 30] {
        let vin: String = "A".repeat(len);
        assert_eq!(validate_vin(&vin), Err(VinError::WrongLength(len)));
    }
    assert!(VinError::WrongLength(3).to_string().contains("17 characters"));
    assert!(VinError::InvalidCharacters.to_string().contains("invalid characters"));
}

#[test]
fn given_raw_vin_input_when_cleaned_then_separators_removed_and_uppercased() {
    assert_eq!(clean_vin(" 1hgcm 8263-3a004352 "), "1HGCM82633A004352");
}

#[test]
fn given_skip_tokens_when_checked_then_bypass_vin_capture() {
    for input in [
        "skip",
        "No",
        "don't have it",
        "Skip.",
        "I don't have it",
        "i dont have the vin",
        "I do not have it with me",
    ] {
        assert!(is_vin_skip(input), "{input}");
    }
    assert!(!is_vin_skip("1HGCM82633A004352"));
    assert!(!is_vin_skip("nothing on the title"));
}

#[test]
fn given_mileage_inputs_when_parsed_then_shorthand_and_bounds_hold() {
    assert_eq!(parse_mileage("45k"), Ok(45_000));
    assert_eq!(parse_mileage("45,000 miles"), Ok(45_000));
    assert_eq!(parse_mileage("0"), Ok(0));
    assert_eq!(parse_mileage("500000"), Ok(500_000));
    assert_eq!(parse_mileage("500,001"), Err(MileageError::OutOfRange));
    assert_eq!(parse_mileage("-1"), Err(MileageError::NotNumeric));
    assert_eq!(parse_mileage("lots"), Err(MileageError::NotNumeric));
}

#[test]
fn given_year_inputs_when_cleaned_then_pivot_and_bounds_hold() {
    assert_eq!(clean_year("98").as_deref(), Ok("1998"));
    assert_eq!(clean_year("05").as_deref(), Ok("2005"));
    assert_eq!(clean_year("1999").as_deref(), Ok("1999"));
    assert_eq!(clean_year("1899"), Err(YearError::OutOfRange));
    assert_eq!(clean_year("2036"), Err(YearError::OutOfRange));
    assert_eq!(clean_year("soon"), Err(YearError::Unparseable));
}

#[test]
fn given_self_introductions_when_parsed_then_prefix_stripped_and_title_cased() {
    assert_eq!(parse_name("My name is ada lovelace"), "Ada Lovelace");
    assert_eq!(parse_name("i am GRACE hopper"), "Grace Hopper");
    assert_eq!(parse_name("call me Al"), "Al");
}

#[test]
fn given_text_with_email_when_extracted_then_lowercased_match() {
    assert_eq!(
        extract_email("reach me at Ada@Example.org please").as_deref(),
        Ok("ada@example.org")
    );
    assert!(extract_email("ada at example").is_err());
}

#[test]
fn given_confirmation_phrases_when_classified_then_sets_are_disjoint() {
    for yes in ["yes", "Yep!", "that's right", "sure, go ahead", "I confirm"] {
        assert!(is_affirmative(yes), "{yes}");
        assert!(!is_negative(yes), "{yes}");
    }
    for no in ["no", "Nope.", "wrong", "no, let me fix it"] {
        assert!(is_negative(no), "{no}");
        assert!(!is_affirmative(no), "{no}");
    }
    assert!(!is_affirmative("yesterday"));
}

#[test]
fn given_lookup_inputs_when_cleaned_then_canonical_or_title_cased() {
    assert_eq!(clean_school("I went to Stanford"), "Stanford University");
    assert_eq!(clean_school("state tech"), "State Tech");
    assert_eq!(clean_degree("Masters"), "Master's Degree");
    assert_eq!(clean_credential("registered nurse"), "Registered Nurse (RN)");
    assert_eq!(clean_credential("scuba diver"), "Scuba Diver");
}

#[test]
fn given_track_keywords_when_detected_then_first_matching_track_wins() {
    let pilot = detect_track("i have my pilot license").expect("pilot track");
    assert_eq!(pilot.track, CredentialTrack::Pilot);
    assert_eq!(pilot.options.len(), 5);

    assert_eq!(
        detect_track("I learned a lot").map(|def| def.track),
        None,
        "short keywords must not fire inside words"
    );
    assert_eq!(
        detect_track("my realtor license").map(|def| def.track),
        Some(CredentialTrack::RealEstate)
    );
}

#[test]
fn given_options_when_reply_is_index_or_fragment_then_option_resolves() {
    let options = CredentialTrack::Pilot.definition().options;
    assert_eq!(match_option(options, "2"), Some("Commercial Pilot (CPL)"));
    assert_eq!(match_option(options, "student pilot"), Some("Student Pilot"));
    assert_eq!(match_option(options, "atp"), Some("Airline Transport Pilot (ATP)"));
    assert_eq!(match_option(options, "9"), None);
}

#[test]
fn given_vertical_keywords_when_detected_then_table_order_decides() {
    assert_eq!(detect_vertical("my truck"), Some(Vertical::Auto));
    assert_eq!(detect_vertical("I just graduated"), Some(Vertical::Education));
    assert_eq!(detect_vertical("our dealer inventory"), Some(Vertical::Business));
    assert_eq!(detect_vertical("kyc checks"), Some(Vertical::Compliance));
    assert_eq!(detect_vertical("hello there"), None);
}

#[test]
fn given_demo_questions_when_answered_then_topic_matches_and_message_non_empty() {
    assert_eq!(demo_reply("how much does this cost").topic, DemoTopic::Pricing);
    assert_eq!(demo_reply("how does it work?").topic, DemoTopic::HowItWorks);
    assert_eq!(demo_reply("is it secure").topic, DemoTopic::Security);
    let fallback = demo_reply("");
    assert_eq!(fallback.topic, DemoTopic::Fallback);
    assert!(!fallback.message.is_empty());
}

#[test]
fn given_flight_data_when_parsed_then_hours_and_ratings_normalized() {
    assert_eq!(parse_flight_hours("1,200 hrs"), Ok(1_200));
    assert!(parse_flight_hours("100001").is_err());
    assert_eq!(
        parse_ratings("ASEL and instrument"),
        vec!["ASEL".to_string(), "Instrument".to_string()]
    );
    assert_eq!(
        parse_ratings("ASEL AND Instrument And multi-engine"),
        vec![
            "ASEL".to_string(),
            "Instrument".to_string(),
            "Multi-engine".to_string()
        ]
    );
    assert_eq!(parse_ratings("Commander"), vec!["Commander".to_string()]);
}
