use std::fmt;

// ---------------------------------------------------------------------------
// Record – one Pokémon card
// ---------------------------------------------------------------------------

/// A single Pokémon record (one valid line of the source data).
///
/// Fields are private: once the factory has built a record nothing can
/// change it, so copies handed out by the store are safe to keep around.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: u32,
    name: String,
    weight_kg: f64,
    height_m: f64,
    attack: f64,
    defense: f64,
    stamina: f64,
    category: String,
}

impl Record {
    pub(crate) fn new(id: u32, fields: RecordFields) -> Self {
        Record {
            id,
            name: fields.name,
            weight_kg: fields.weight_kg,
            height_m: fields.height_m,
            attack: fields.attack,
            defense: fields.defense,
            stamina: fields.stamina,
            category: fields.category,
        }
    }

    /// Sequential id assigned by the factory, starting at 1.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    pub fn attack(&self) -> f64 {
        self.attack
    }

    pub fn defense(&self) -> f64 {
        self.defense
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    /// Full category string, e.g. `"Grass-Poison"`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// First type tag of the category.
    pub fn primary_type(&self) -> &str {
        self.types().next().unwrap_or("")
    }

    /// Second type tag, if the record is dual-typed.
    pub fn secondary_type(&self) -> Option<&str> {
        self.types().nth(1)
    }

    /// Iterate over the hyphen-separated type tags.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.category.split('-').map(str::trim).filter(|t| !t.is_empty())
    }

    /// (attack + defense + stamina) × 100. Never stored.
    pub fn power_level(&self) -> f64 {
        (self.attack + self.defense + self.stamina) * 100.0
    }

    /// Case-insensitive comparison against the record name.
    pub fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:03} {} ({}) power {:.1}",
            self.id,
            self.name,
            self.category,
            self.power_level()
        )
    }
}

// ---------------------------------------------------------------------------
// RecordFields – parsed line content, before an id is assigned
// ---------------------------------------------------------------------------

/// The seven fields of a source line after unit suffixes are stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    pub name: String,
    pub weight_kg: f64,
    pub height_m: f64,
    pub attack: f64,
    pub defense: f64,
    pub stamina: f64,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charizard() -> Record {
        Record::new(
            6,
            RecordFields {
                name: "Charizard".to_string(),
                weight_kg: 90.5,
                height_m: 1.7,
                attack: 0.84,
                defense: 0.78,
                stamina: 0.78,
                category: "Fire-Flying".to_string(),
            },
        )
    }

    #[test]
    fn test_power_level() {
        let record = charizard();
        assert!((record.power_level() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_type_tags() {
        let record = charizard();
        assert_eq!(record.primary_type(), "Fire");
        assert_eq!(record.secondary_type(), Some("Flying"));
        assert_eq!(record.types().count(), 2);
    }

    #[test]
    fn test_single_type_has_no_secondary() {
        let mut fields = RecordFields {
            name: "Pikachu".to_string(),
            weight_kg: 6.0,
            height_m: 0.4,
            attack: 0.55,
            defense: 0.40,
            stamina: 0.35,
            category: "Electric".to_string(),
        };
        let record = Record::new(1, fields.clone());
        assert_eq!(record.primary_type(), "Electric");
        assert_eq!(record.secondary_type(), None);

        fields.category = "Electric-".to_string();
        let record = Record::new(2, fields);
        assert_eq!(record.secondary_type(), None);
    }

    #[test]
    fn test_name_matches_ignores_case() {
        let record = charizard();
        assert!(record.name_matches("charizard"));
        assert!(record.name_matches("CHARIZARD"));
        assert!(!record.name_matches("Charmander"));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            charizard().to_string(),
            "#006 Charizard (Fire-Flying) power 240.0"
        );
    }
}
