use crate::shared::i18n::TableStrings;

/// Builds the bulk delete confirmation, e.g.
/// `Delete these Entities: 'Alice', 'Bob' ?`
///
/// Every label is quoted; all but the last are followed by `, `, the last
/// one by ` ?`.
pub fn delete_confirmation(strings: &TableStrings, entity_title: &str, labels: &[String]) -> String {
    let prefix = [
        strings.confirmation_delete_several1.as_str(),
        entity_title,
        strings.confirmation_delete_several2.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    let mut msg = format!("{}: ", prefix);
    let last = labels.len().saturating_sub(1);
    for (i, label) in labels.iter().enumerate() {
        if i == last {
            msg.push_str(&format!("'{}' ?", label));
        } else {
            msg.push_str(&format!("'{}', ", label));
        }
    }
    msg
}
