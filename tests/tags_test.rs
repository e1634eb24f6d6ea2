use fanwiki_digest::{normalize_certain_names, TagSet};

#[test]
fn normalization_is_idempotent_over_a_tag_corpus() {
    let corpus = [
        "us", "Us", "US", "uk", "apa", "ia", "nz", "first_fandom", "First fandom",
        "fanzine", "Fanzine", "conrunner", "big_name_fan", "x", "é",
    ];
    for raw in corpus {
        let once = normalize_certain_names(raw);
        let twice = normalize_certain_names(&once);
        assert_eq!(once, twice, "normalize must be idempotent for {raw:?}");
    }
}

#[test]
fn membership_respects_normalization_both_ways() {
    let mut tags = TagSet::normalized();
    tags.add_one("us");
    assert!(tags.contains("US"));

    let mut tags = TagSet::normalized();
    tags.add_one("US");
    assert!(tags.contains("us"));
}

#[test]
fn normalized_and_raw_sets_differ_only_in_canonicalization() {
    let mut normalized = TagSet::normalized();
    let mut raw = TagSet::raw();
    for tag in ["fanzine", "first_fandom", "us"] {
        normalized.add_one(tag);
        raw.add_one(tag);
    }

    assert_eq!(normalized.to_string(), "Fanzine, First Fandom, US");
    assert_eq!(raw.to_string(), "fanzine, first_fandom, us");
    assert_eq!(normalized.len(), raw.len());
}

#[test]
fn add_many_accepts_any_string_iterator() {
    let mut tags = TagSet::normalized();
    tags.add_many(vec!["club".to_string(), "apa".to_string()]);
    tags.add_many(["club"]);
    assert_eq!(tags.len(), 2);
}

#[test]
fn iteration_yields_every_member() {
    let mut tags = TagSet::normalized();
    tags.add_many(["fan", "pro"]);
    let mut seen: Vec<&str> = tags.iter().collect();
    seen.sort_unstable();
    assert_eq!(seen, ["Fan", "Pro"]);
}
