//! Person records and balance classification

use log::warn;
use rust_decimal::Decimal;

/// One member of the club, rebuilt fresh on every ledger load.
///
/// No identity is kept across loads; the spreadsheet is the only source of
/// truth for who exists and what they owe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub current_balance: Decimal,
    pub total_debit: Decimal,
    pub total_paid: Decimal,
}

impl Person {
    /// A person with no financial history, used for soft misses.
    pub fn zeroed(name: impl Into<String>) -> Self {
        Person {
            name: name.into(),
            current_balance: Decimal::ZERO,
            total_debit: Decimal::ZERO,
            total_paid: Decimal::ZERO,
        }
    }

    /// Owes the club money (strictly negative balance).
    pub fn is_debtor(&self) -> bool {
        self.current_balance < Decimal::ZERO
    }

    /// Paid in advance (strictly positive balance).
    pub fn is_prepaid(&self) -> bool {
        self.current_balance > Decimal::ZERO
    }
}

/// Partition people into (debtors, prepaid) by strict balance sign.
///
/// Zero balances land in neither group. Relative input order is preserved
/// in both outputs.
pub fn classify(people: &[Person]) -> (Vec<Person>, Vec<Person>) {
    let debtors = people.iter().filter(|p| p.is_debtor()).cloned().collect();
    let prepaid = people.iter().filter(|p| p.is_prepaid()).cloned().collect();
    (debtors, prepaid)
}

/// Find a person by name, falling back to a zero-balance record.
///
/// A missing row is a soft miss: the listing must not abort because one
/// name is absent, so the caller gets a zeroed `Person` and a diagnostic
/// is logged.
pub fn lookup(name: &str, people: &[Person]) -> Person {
    match people.iter().find(|p| p.name == name) {
        Some(person) => person.clone(),
        None => {
            warn!("person {name:?} not found in the ledger, treating as zero balance");
            Person::zeroed(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn person(name: &str, balance: &str) -> Person {
        Person {
            name: name.into(),
            current_balance: Decimal::from_str(balance).unwrap(),
            total_debit: Decimal::ZERO,
            total_paid: Decimal::ZERO,
        }
    }

    #[test]
    fn test_classify_partitions_by_sign() {
        let people = vec![
            person("Alice", "-20.00"),
            person("Bob", "10.00"),
            person("Carol", "0.00"),
        ];

        let (debtors, prepaid) = classify(&people);

        assert_eq!(debtors.len(), 1);
        assert_eq!(debtors[0].name, "Alice");
        assert_eq!(prepaid.len(), 1);
        assert_eq!(prepaid[0].name, "Bob");
    }

    #[test]
    fn test_classify_is_a_partition() {
        let people = vec![
            person("A", "-1"),
            person("B", "2"),
            person("C", "0"),
            person("D", "-3"),
            person("E", "4"),
        ];

        let (debtors, prepaid) = classify(&people);
        let settled: Vec<_> = people
            .iter()
            .filter(|p| !p.is_debtor() && !p.is_prepaid())
            .collect();

        // disjoint groups that together cover the whole input
        assert_eq!(debtors.len() + prepaid.len() + settled.len(), people.len());
        for d in &debtors {
            assert!(!prepaid.contains(d));
        }
    }

    #[test]
    fn test_classify_preserves_order() {
        let people = vec![person("Z", "-1"), person("A", "-2"), person("M", "-3")];
        let (debtors, _) = classify(&people);
        let names: Vec<_> = debtors.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Z", "A", "M"]);
    }

    #[test]
    fn test_lookup_soft_miss_returns_zeroed() {
        let people = vec![person("Alice", "-20.00")];
        let ghost = lookup("Nobody", &people);
        assert_eq!(ghost, Person::zeroed("Nobody"));
    }

    #[test]
    fn test_lookup_finds_existing() {
        let people = vec![person("Alice", "-20.00")];
        assert_eq!(lookup("Alice", &people), people[0]);
    }
}
