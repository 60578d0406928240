use std::collections::HashMap;
use std::sync::OnceLock;

static NICKNAME_CLASSES: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();

/// Registered equivalence classes of formal first names and their informal
/// variants. Every token in a row maps to the same class; lookups are over
/// already-normalized (lowercased) tokens.
const CLASSES: &[&[&str]] = &[
    &["robert", "bob", "rob", "bobby", "bert"],
    &["william", "bill", "billy", "will", "liam"],
    &["elizabeth", "liz", "beth", "betsy", "lizzie", "eliza"],
    &["margaret", "peggy", "meg", "maggie", "marge"],
    &["james", "jim", "jimmy", "jamie"],
    &["michael", "mike", "mikey"],
    &["richard", "rick", "dick", "richie", "rich"],
    &["katherine", "kate", "katie", "kathy", "kat", "kitty"],
    &["jennifer", "jen", "jenny"],
    &["joseph", "joe", "joey"],
    &["thomas", "tom", "tommy"],
    &["charles", "chuck", "charlie", "chas"],
    &["christopher", "chris", "topher"],
    &["daniel", "dan", "danny"],
    &["matthew", "matt"],
    &["anthony", "tony"],
    &["steven", "steve", "stephen"],
    &["andrew", "andy", "drew"],
    &["edward", "ed", "eddie", "ted", "ned"],
    &["david", "dave", "davey"],
    &["nicholas", "nick", "nicky"],
    &["samuel", "sam", "sammy"],
    &["benjamin", "ben", "benny"],
    &["alexander", "alex", "sandy", "xander"],
    &["patricia", "pat", "patty", "tricia", "trish"],
    &["susan", "sue", "susie", "suzy"],
    &["deborah", "deb", "debbie"],
    &["rebecca", "becky", "becca"],
    &["victoria", "vicky", "tori"],
    &["jonathan", "jon", "jonny"],
    &["timothy", "tim", "timmy"],
    &["gregory", "greg"],
    &["jeffrey", "jeff"],
    &["kenneth", "ken", "kenny"],
    &["lawrence", "larry"],
    &["ronald", "ron", "ronnie"],
    &["donald", "don", "donnie"],
    &["barbara", "barb", "barbie"],
    &["sandra", "sandi"],
    &["kimberly", "kim"],
    &["cynthia", "cindy"],
    &["pamela", "pam"],
    &["frances", "fran", "frannie"],
    &["abigail", "abby", "gail"],
];

fn class_index() -> &'static HashMap<&'static str, usize> {
    NICKNAME_CLASSES.get_or_init(|| {
        let mut map = HashMap::new();
        for (index, class) in CLASSES.iter().enumerate() {
            for name in *class {
                map.insert(*name, index);
            }
        }
        map
    })
}

/// Whether two normalized first-name tokens belong to the same registered
/// equivalence class. A token equal to itself is only considered equivalent
/// here when it is registered; exact-match handling lives with the caller.
pub(crate) fn same_class(a: &str, b: &str) -> bool {
    match (class_index().get(a), class_index().get(b)) {
        (Some(left), Some(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
pub(crate) fn class_of_for_tests(name: &str) -> Option<usize> {
    class_index().get(name).copied()
}
