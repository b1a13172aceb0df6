/// Placeholder context: the substitution values derived from one spin.
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::Rng;
use rustc_hash::FxHashMap;

use crate::core::phrase::PhraseError;
use crate::schema::machine::MachineStyle;
use crate::schema::symbol::SpunReels;

/// Every placeholder name the context supplies. Catalog templates may
/// only reference names in this list; the linter checks coverage
/// against it.
pub const CONTEXT_KEYS: &[&str] = &[
    "machine",
    "payline",
    "random_payline",
    "outside_payline",
    "random_outside_payline",
    "month",
    "weekday",
];

/// Build the placeholder map for one spin.
///
/// The spin must have at least one reel and exactly three symbols per
/// reel (top, centre, bottom). The centre row forms the payline; the
/// top row followed by the bottom row forms the outside payline. The
/// `random_*` entries are drawn uniformly with the supplied rng, and
/// `month`/`weekday` name the given date, so the whole map is a pure
/// function of its arguments and the rng's draws.
pub fn build_context(
    machine: &MachineStyle,
    reels: &SpunReels,
    today: NaiveDate,
    rng: &mut StdRng,
) -> Result<FxHashMap<String, String>, PhraseError> {
    if reels.is_empty() {
        return Err(PhraseError::InvalidSpinShape("no reels in spin".to_string()));
    }
    for (index, reel) in reels.iter().enumerate() {
        if reel.len() != 3 {
            return Err(PhraseError::InvalidSpinShape(format!(
                "reel {} shows {} symbols, expected 3",
                index,
                reel.len()
            )));
        }
    }

    let payline: Vec<&str> = reels.iter().map(|r| r[1].description.as_str()).collect();
    let outside: Vec<&str> = reels
        .iter()
        .map(|r| r[0].description.as_str())
        .chain(reels.iter().map(|r| r[2].description.as_str()))
        .collect();

    let random_payline = payline[rng.gen_range(0..payline.len())];
    let random_outside = outside[rng.gen_range(0..outside.len())];

    let mut context = FxHashMap::default();
    context.insert("machine".to_string(), machine.description.clone());
    context.insert("payline".to_string(), join_natural(&payline));
    context.insert("random_payline".to_string(), random_payline.to_string());
    context.insert("outside_payline".to_string(), join_natural(&outside));
    context.insert(
        "random_outside_payline".to_string(),
        random_outside.to_string(),
    );
    context.insert("month".to_string(), today.format("%B").to_string());
    context.insert("weekday".to_string(), today.format("%A").to_string());

    Ok(context)
}

/// Join a list the way a caption would read it aloud: "Cherry",
/// "Cherry and Bell", "Cherry, Bell, and Lemon".
pub(crate) fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{} and {}", first, second),
        [head @ .., last] => format!("{}, and {}", head.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::symbol::SpunSymbol;
    use rand::SeedableRng;
    use std::path::PathBuf;

    fn make_style() -> MachineStyle {
        MachineStyle {
            description: "Golden".to_string(),
            background: PathBuf::from("bg.png"),
            foreground: PathBuf::from("fg.png"),
            positions: vec![vec![(0, 0), (0, 1), (0, 2)]; 3],
        }
    }

    fn spun(description: &str) -> SpunSymbol {
        SpunSymbol {
            description: description.to_string(),
            image_file: PathBuf::from(format!("{}.png", description.to_lowercase())),
        }
    }

    fn make_reels() -> SpunReels {
        vec![
            vec![spun("Lemon"), spun("Cherry"), spun("Grape")],
            vec![spun("Orange"), spun("Bell"), spun("Melon")],
            vec![spun("Seven"), spun("Cherry"), spun("Bar")],
        ]
    }

    fn fixed_date() -> NaiveDate {
        // A Monday in August.
        NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
    }

    #[test]
    fn context_has_every_key() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = build_context(&make_style(), &make_reels(), fixed_date(), &mut rng).unwrap();
        for key in CONTEXT_KEYS {
            assert!(ctx.contains_key(*key), "missing context key {}", key);
        }
        assert_eq!(ctx.len(), CONTEXT_KEYS.len());
    }

    #[test]
    fn payline_is_centre_row_in_reel_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = build_context(&make_style(), &make_reels(), fixed_date(), &mut rng).unwrap();
        assert_eq!(ctx["payline"], "Cherry, Bell, and Cherry");
    }

    #[test]
    fn outside_payline_is_tops_then_bottoms() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = build_context(&make_style(), &make_reels(), fixed_date(), &mut rng).unwrap();
        assert_eq!(
            ctx["outside_payline"],
            "Lemon, Orange, Seven, Grape, Melon, and Bar"
        );
    }

    #[test]
    fn random_entries_come_from_their_rows() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let ctx = build_context(&make_style(), &make_reels(), fixed_date(), &mut rng).unwrap();
            assert!(["Cherry", "Bell"].contains(&ctx["random_payline"].as_str()));
            assert!(["Lemon", "Orange", "Seven", "Grape", "Melon", "Bar"]
                .contains(&ctx["random_outside_payline"].as_str()));
        }
    }

    #[test]
    fn month_and_weekday_are_named() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = build_context(&make_style(), &make_reels(), fixed_date(), &mut rng).unwrap();
        assert_eq!(ctx["month"], "August");
        assert_eq!(ctx["weekday"], "Monday");
    }

    #[test]
    fn machine_name_passes_through() {
        let mut rng = StdRng::seed_from_u64(1);
        let ctx = build_context(&make_style(), &make_reels(), fixed_date(), &mut rng).unwrap();
        assert_eq!(ctx["machine"], "Golden");
    }

    #[test]
    fn empty_reels_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = build_context(&make_style(), &Vec::new(), fixed_date(), &mut rng);
        assert!(matches!(result, Err(PhraseError::InvalidSpinShape(_))));
    }

    #[test]
    fn short_reel_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        let reels = vec![vec![spun("Cherry"), spun("Bell")]];
        let result = build_context(&make_style(), &reels, fixed_date(), &mut rng);
        assert!(matches!(result, Err(PhraseError::InvalidSpinShape(_))));
    }

    #[test]
    fn wide_reel_invalid() {
        let mut rng = StdRng::seed_from_u64(1);
        let reels = vec![vec![
            spun("Cherry"),
            spun("Bell"),
            spun("Lemon"),
            spun("Grape"),
        ]];
        let result = build_context(&make_style(), &reels, fixed_date(), &mut rng);
        assert!(matches!(result, Err(PhraseError::InvalidSpinShape(_))));
    }

    #[test]
    fn join_natural_forms() {
        assert_eq!(join_natural(&[]), "");
        assert_eq!(join_natural(&["Cherry"]), "Cherry");
        assert_eq!(join_natural(&["Cherry", "Bell"]), "Cherry and Bell");
        assert_eq!(
            join_natural(&["Cherry", "Bell", "Lemon"]),
            "Cherry, Bell, and Lemon"
        );
    }
}
