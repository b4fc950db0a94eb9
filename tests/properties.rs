use fmtguess::{ValueKind, analyze};
use proptest::prelude::*;
use std::collections::HashSet;

fn grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

proptest! {
    #[test]
    fn analysis_is_total(sample in ".{0,48}") {
        for candidate in analyze(&sample) {
            prop_assert_eq!(candidate.kind, candidate.spec.value_kind);
            let has_placeholder = candidate.text.contains("{variable");
            prop_assert!(has_placeholder, "no placeholder in {:?}", candidate.text);
        }
    }

    #[test]
    fn candidates_are_unique(sample in "[ _*a-zA-Z0-9.,:%+/x-]{0,24}") {
        let mut seen = HashSet::new();
        for candidate in analyze(&sample) {
            let text = candidate.text.clone();
            let fresh = seen.insert((candidate.kind, candidate.text));
            prop_assert!(fresh, "duplicate candidate {:?}", text);
        }
    }

    #[test]
    fn literals_survive_rendering(n in 1_000u64..1_000_000_000) {
        let sample = format!("Total: {} USD", grouped(n));
        let out = analyze(&sample);
        let has_grouped_int = out
            .iter()
            .any(|c| c.kind == ValueKind::Int && c.text == "Total: {variable:,} USD");
        prop_assert!(has_grouped_int, "missing grouped int for {:?}", sample);
        for candidate in &out {
            let wrapped = candidate.text.starts_with("Total: {variable")
                && candidate.text.ends_with("} USD");
            prop_assert!(wrapped, "literals lost in {:?}", candidate.text);
        }
    }

    #[test]
    fn percentages_keep_their_precision(whole in 0u32..1000, fraction in 0u32..100) {
        let sample = format!("{whole}.{fraction:02}%");
        let out = analyze(&sample);
        prop_assert_eq!(out.len(), 1);
        prop_assert_eq!(&out[0].text, "{variable:.2%}");
    }

    #[test]
    fn symmetric_asterisks_center(n in 1u32..100_000, pad in 1usize..5) {
        let stars = "*".repeat(pad);
        let sample = format!("{stars}{n}{stars}");
        let width = sample.len();
        let out = analyze(&sample);
        prop_assert_eq!(&out[0].text, &format!("{{variable:*^{width}d}}"));
    }
}
