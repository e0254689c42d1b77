/// Property-based tests using proptest
/// Tests invariants of the name request builder and the XML -> JSON transcoder
use ccb_whois::errors::AppError;
use ccb_whois::name_query::{NamePolicy, SearchQuery};
use ccb_whois::transcoder::transcode;
use proptest::prelude::*;
use serde_json::Value;

fn policy() -> impl Strategy<Value = NamePolicy> {
    prop_oneof![Just(NamePolicy::FirstToken), Just(NamePolicy::FirstLast)]
}

// Property: names are split on whitespace, never validated
proptest! {
    #[test]
    fn whitespace_only_is_empty_input(name in "[ \t\r\n]*", policy in policy()) {
        prop_assert_eq!(SearchQuery::parse(&name, policy), Err(AppError::EmptyInput));
    }

    #[test]
    fn two_tokens_map_to_first_and_last(
        first in "[A-Za-z]{1,12}",
        last in "[A-Za-z]{1,12}",
        gap in "[ \t]{1,3}",
        policy in policy()
    ) {
        let query = SearchQuery::parse(&format!("{}{}{}", first, gap, last), policy).unwrap();
        prop_assert_eq!(
            query.query_string(),
            format!("first_name={}&last_name={}", first, last)
        );
    }

    #[test]
    fn one_token_maps_to_first_name_only(first in "[A-Za-z]{1,12}", policy in policy()) {
        let query = SearchQuery::parse(&first, policy).unwrap();
        prop_assert_eq!(query.query_string(), format!("first_name={}", first));
    }

    #[test]
    fn three_or_more_tokens_keep_first_by_default(tokens in prop::collection::vec("[A-Za-z]{1,8}", 3..6)) {
        let query = SearchQuery::parse(&tokens.join(" "), NamePolicy::FirstToken).unwrap();
        prop_assert_eq!(&query.first_name, &tokens[0]);
        prop_assert_eq!(query.last_name, None);
    }

    #[test]
    fn three_or_more_tokens_first_last_policy(tokens in prop::collection::vec("[A-Za-z]{1,8}", 3..6)) {
        let query = SearchQuery::parse(&tokens.join(" "), NamePolicy::FirstLast).unwrap();
        prop_assert_eq!(&query.first_name, &tokens[0]);
        prop_assert_eq!(query.last_name.as_ref(), tokens.last());
    }

    #[test]
    fn parse_never_panics(name in "\\PC*", policy in policy()) {
        let _ = SearchQuery::parse(&name, policy);
    }
}

fn individual_xml(inner: &str) -> String {
    format!(
        "<ccb_api><response><individuals count=\"1\"><individual id=\"1\">{}</individual></individuals></response></ccb_api>",
        inner
    )
}

fn individual_json(xml: &str) -> Value {
    let json: Value = serde_json::from_str(&transcode(xml.as_bytes()).unwrap()).unwrap();
    json["response"]["individuals"]["individual"].clone()
}

// Field values without markup characters. Surrounding whitespace is trimmed
// by the transcoder, so the padding is generated separately.
const FIELD_VALUE: &str = "[A-Za-z0-9][A-Za-z0-9 .,:@/-]{0,20}[A-Za-z0-9]";
const PADDING: &str = "[ \t\n]{0,3}";

// Property: present fields round-trip, absent fields are omitted
proptest! {
    #[test]
    fn present_fields_round_trip(
        first_name in proptest::option::of(FIELD_VALUE),
        last_name in proptest::option::of(FIELD_VALUE),
        email in proptest::option::of(FIELD_VALUE),
        birthday in proptest::option::of(FIELD_VALUE),
        campus_id in proptest::option::of("[0-9]{1,6}"),
        lead in PADDING,
        trail in PADDING
    ) {
        let mut inner = String::new();
        for (tag, value) in [
            ("first_name", &first_name),
            ("last_name", &last_name),
            ("email", &email),
            ("birthday", &birthday),
        ] {
            if let Some(v) = value {
                inner.push_str(&format!(
                    "<{tag}>{lead}{v}{trail}</{tag}>",
                    tag = tag,
                    lead = lead,
                    v = v,
                    trail = trail
                ));
            }
        }
        if let Some(ref id) = campus_id {
            inner.push_str(&format!("<campus id=\"{}\"/>", id));
        }

        let individual = individual_json(&individual_xml(&inner));

        for (field, value) in [
            ("first_name", &first_name),
            ("last_name", &last_name),
            ("email", &email),
            ("birthday", &birthday),
        ] {
            match value {
                Some(v) => {
                    prop_assert_eq!(individual[field].as_str(), Some(v.as_str()));
                }
                None => {
                    prop_assert!(individual.get(field).is_none());
                }
            }
        }
        match campus_id {
            Some(id) => {
                prop_assert_eq!(individual["campus"]["id"].as_str(), Some(id.as_str()));
            }
            None => {
                prop_assert!(individual.get("campus").is_none());
            }
        }
    }

    #[test]
    fn address_multiplicity_and_order(
        cities in prop::collection::vec("[A-Za-z]{1,10}", 0..6),
        noise in prop::collection::vec(prop::bool::ANY, 6)
    ) {
        // Unknown elements may sit between list items.
        let addresses: String = cities
            .iter()
            .zip(&noise)
            .map(|(c, &extra)| {
                let note = if extra { "<note>x</note>" } else { "" };
                format!("{}<address type=\"home\"><city>{}</city></address>", note, c)
            })
            .collect();
        let xml = individual_xml(&format!("<addresses>{}</addresses>", addresses));

        let individual = individual_json(&xml);
        let output: Vec<&str> = individual["addresses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["city"].as_str().unwrap())
            .collect();
        let expected: Vec<&str> = cities.iter().map(String::as_str).collect();
        prop_assert_eq!(output, expected);
    }

    #[test]
    fn phone_multiplicity_and_order(types in prop::collection::vec("[a-z]{1,8}", 0..6)) {
        let phones: String = types
            .iter()
            .map(|t| format!("<phone type=\"{}\"/>", t))
            .collect();
        let xml = individual_xml(&format!("<phones>{}</phones>", phones));

        let individual = individual_json(&xml);
        let output: Vec<&str> = individual["phones"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["type"].as_str().unwrap())
            .collect();
        let expected: Vec<&str> = types.iter().map(String::as_str).collect();
        prop_assert_eq!(output, expected);
    }
}
