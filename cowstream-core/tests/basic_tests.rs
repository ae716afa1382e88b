//! Basic tests for cowstream-core

use cowstream_core::*;
use proptest::prelude::*;

#[test]
fn test_classify_then_decode() {
    let line = classify("Haus\tNN\tHaus\t3\t2\tpn");
    let token = match line {
        Line::Data(fields) => decode(&fields),
        _ => None,
    };
    assert_eq!(token, Some(Token::new("Haus", "NN", "Haus", "3", "2", "pn")));
}

#[test]
fn test_two_field_line_contributes_nothing() {
    let fragment = "<s>\nfoo\tbar\n</s>";

    assert!(extract(fragment, false).tokens().is_empty());
    assert_eq!(extract(fragment, true).structure(), Some(&[][..]));
}

#[test]
fn test_paragraph_markup_inside_sentence() {
    let fragment = "\
<s id=\"s7\" doc=\"d1\">
<p>
Das\tART\tdie\t1\t2\tdet
Haus\tNN\tHaus\t2\t0\troot
</p>
<p>
.\t$.\t.\t3\t2\tpunct
</p>
</s>";

    let data = extract(fragment, true);
    let labels: Vec<String> = data.structure().unwrap().iter().map(|m| m.label()).collect();
    assert_eq!(
        labels,
        ["p_open", "ART", "NN", "p_close", "p_open", "$.", "p_close"]
    );

    let columns = separate(data.tokens());
    assert_eq!(columns.token, ["Das", "Haus", "."]);
    assert_eq!(columns.dephead, ["2", "0", "2"]);
}

#[test]
fn test_structure_and_plain_agree_on_tokens() {
    let fragment = "<s>\n<x>\na\tA\ta\t1\t0\troot\nbroken\n</x>\nb\tB\tb\t2\t1\tdep\n</s>";
    assert_eq!(
        extract(fragment, true).into_tokens(),
        extract(fragment, false).into_tokens()
    );
}

fn token_line() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z0-9.$]{1,6}", 6).prop_map(|f| f.join("\t"))
}

fn junk_line() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z0-9]{1,6}", 1..5usize).prop_map(|f| f.join("\t"))
}

proptest! {
    #[test]
    fn prop_token_count_matches_valid_lines(
        good in proptest::collection::vec(token_line(), 0..20usize),
        bad in proptest::collection::vec(junk_line(), 0..20usize),
    ) {
        let mut lines = vec!["<s>".to_string()];
        lines.extend(good.iter().cloned());
        lines.extend(bad.iter().cloned());
        lines.push("</s>".to_string());
        let fragment = lines.join("\n");

        let data = extract(&fragment, true);
        prop_assert_eq!(data.tokens().len(), good.len());
        prop_assert_eq!(data.structure().unwrap().len(), good.len());
    }
}
