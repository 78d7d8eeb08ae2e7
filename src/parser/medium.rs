use crate::model::Medium;

/// Filename keywords are checked before the description, and case-sensitively.
const FILENAME_RULES: &[(&str, Medium)] = &[
    ("bronze", Medium::Bronze),
    ("bois", Medium::Wood),
    ("litho", Medium::Lithography),
];

const DESCRIPTION_RULES: &[(&[&str], Medium)] = &[
    (&["bronze"], Medium::Bronze),
    (&["bois", "wood"], Medium::Wood),
    (&["litho"], Medium::Lithography),
];

/// Infer the medium of an artwork from the page it came from and its
/// description. First match wins; anything unmatched is `Other`.
pub fn classify(filename: &str, description: &str) -> Medium {
    if let Some((_, medium)) = FILENAME_RULES.iter().find(|(kw, _)| filename.contains(kw)) {
        return *medium;
    }

    let lower = description.to_lowercase();
    DESCRIPTION_RULES
        .iter()
        .find(|(kws, _)| kws.iter().any(|kw| lower.contains(kw)))
        .map(|(_, medium)| *medium)
        .unwrap_or(Medium::Other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_beats_description() {
        assert_eq!(classify("statue-bronze-01.html", "carved from wood"), Medium::Bronze);
        assert_eq!(classify("bois-flotte.html", "a lithograph"), Medium::Wood);
        assert_eq!(classify("lithographies.html", "bronze patina"), Medium::Lithography);
    }

    #[test]
    fn filename_rule_order() {
        assert_eq!(classify("bronze-et-bois.html", ""), Medium::Bronze);
        assert_eq!(classify("bois-litho.html", ""), Medium::Wood);
    }

    #[test]
    fn filename_match_is_case_sensitive() {
        assert_eq!(classify("Bronze.html", ""), Medium::Other);
        assert_eq!(classify("Bronze.html", "Patinated BRONZE"), Medium::Bronze);
    }

    #[test]
    fn description_rules() {
        assert_eq!(classify("misc.html", "Cast in Bronze, 1998"), Medium::Bronze);
        assert_eq!(classify("misc.html", "Sculpture en BOIS"), Medium::Wood);
        assert_eq!(classify("carvings.html", "carved from wood"), Medium::Wood);
        assert_eq!(classify("misc.html", "Lithographie sur papier"), Medium::Lithography);
    }

    #[test]
    fn description_rule_order() {
        assert_eq!(classify("misc.html", "wood base, bronze figure"), Medium::Bronze);
        assert_eq!(classify("misc.html", "litho mounted on wood"), Medium::Wood);
    }

    #[test]
    fn unmatched_is_other() {
        assert_eq!(classify("misc.html", "an etching on paper"), Medium::Other);
        assert_eq!(classify("", ""), Medium::Other);
    }
}
