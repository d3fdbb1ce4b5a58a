//! Realistic field values.
//!
//! [`FakeData`] is the seam for field-value synthesis. Implementations must
//! draw exclusively from the `SeedRng` they are handed so that generated
//! values stay reproducible. [`WordListFaker`] is the built-in provider,
//! backed by static US-English word lists.

use crate::rng::SeedRng;
use chrono::{Datelike, Duration, Months, NaiveDate};

/// Seedable provider of realistic field values.
pub trait FakeData {
    /// Street address, city, state and ZIP code on one line.
    fn full_address(&self, rng: &mut SeedRng) -> String;

    /// Gender-neutral given name.
    fn neutral_first_name(&self, rng: &mut SeedRng) -> String;

    fn first_name(&self, rng: &mut SeedRng) -> String;

    fn last_name(&self, rng: &mut SeedRng) -> String;

    /// Commercial product name such as "Rustic Cotton Chair".
    fn product_name(&self, rng: &mut SeedRng) -> String;

    fn word(&self, rng: &mut SeedRng) -> String;

    /// Name of a spoken language.
    fn language_name(&self, rng: &mut SeedRng) -> String;

    /// Capitalized sentence of `words` words ending in a period.
    fn sentence(&self, rng: &mut SeedRng, words: usize) -> String {
        let mut text = (0..words.max(1))
            .map(|_| self.word(rng))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = text.get(..1) {
            let upper = first.to_uppercase();
            text.replace_range(..1, &upper);
        }
        text.push('.');
        text
    }

    /// Email address built from a person name.
    fn email(&self, rng: &mut SeedRng) -> String {
        let first = self.first_name(rng);
        let last = self.last_name(rng);
        let suffix = rng.range_inclusive(1, 99);
        format!("{first}.{last}{suffix}@example.com").to_lowercase()
    }

    /// Uniform date in `[from, to]`; `from` when the range is empty.
    fn date_between(&self, rng: &mut SeedRng, from: NaiveDate, to: NaiveDate) -> NaiveDate {
        let span = (to - from).num_days();
        from + Duration::days(rng.range_inclusive(0, span.max(0)))
    }

    /// Date within the `days` days before `today`.
    fn date_past(&self, rng: &mut SeedRng, today: NaiveDate, days: i64) -> NaiveDate {
        self.date_between(rng, today - Duration::days(days.max(1)), today - Duration::days(1))
    }

    /// Date within the `days` days after `today`.
    fn date_future(&self, rng: &mut SeedRng, today: NaiveDate, days: i64) -> NaiveDate {
        self.date_between(rng, today + Duration::days(1), today + Duration::days(days.max(1)))
    }

    /// Birthday of someone aged between `min_age` and `max_age` on `today`.
    fn birthday(&self, rng: &mut SeedRng, today: NaiveDate, min_age: u32, max_age: u32) -> NaiveDate {
        let latest = years_before(today, min_age);
        let earliest = years_before(today, max_age + 1) + Duration::days(1);
        self.date_between(rng, earliest, latest)
    }

    /// First day of the birth month of someone aged between `min_age` and
    /// `max_age` on `today`.
    ///
    /// Only months whose first day still falls inside the age band are drawn.
    fn birth_month(&self, rng: &mut SeedRng, today: NaiveDate, min_age: u32, max_age: u32) -> NaiveDate {
        let latest = years_before(today, min_age);
        let earliest = first_of_month_on_or_after(years_before(today, max_age + 1) + Duration::days(1));
        let day = self.date_between(rng, earliest, latest);
        day.with_day(1).unwrap_or(day)
    }

    /// String of `len` random lowercase letters and digits.
    fn alphanumeric(&self, rng: &mut SeedRng, len: usize) -> String {
        (0..len)
            .map(|_| ALPHANUMERIC[rng.below(ALPHANUMERIC.len())] as char)
            .collect()
    }
}

const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(years * 12))
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(date.year() - years as i32, 1, 1).unwrap_or(date))
}

fn first_of_month_on_or_after(date: NaiveDate) -> NaiveDate {
    if date.day() == 1 {
        return date;
    }
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .unwrap_or(date)
}

/// Built-in provider drawing from static word lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordListFaker;

impl WordListFaker {
    fn pick(rng: &mut SeedRng, list: &[&str]) -> String {
        list[rng.below(list.len())].to_string()
    }
}

impl FakeData for WordListFaker {
    fn full_address(&self, rng: &mut SeedRng) -> String {
        let number = rng.range_inclusive(1, 9999);
        let street = Self::pick(rng, STREET_NAMES);
        let suffix = Self::pick(rng, STREET_SUFFIXES);
        let city = Self::pick(rng, CITIES);
        let state = Self::pick(rng, STATES);
        let zip = rng.range_inclusive(10000, 99999);
        format!("{number} {street} {suffix}, {city}, {state} {zip}")
    }

    fn neutral_first_name(&self, rng: &mut SeedRng) -> String {
        Self::pick(rng, NEUTRAL_FIRST_NAMES)
    }

    fn first_name(&self, rng: &mut SeedRng) -> String {
        Self::pick(rng, FIRST_NAMES)
    }

    fn last_name(&self, rng: &mut SeedRng) -> String {
        Self::pick(rng, LAST_NAMES)
    }

    fn product_name(&self, rng: &mut SeedRng) -> String {
        let adjective = Self::pick(rng, PRODUCT_ADJECTIVES);
        let material = Self::pick(rng, PRODUCT_MATERIALS);
        let product = Self::pick(rng, PRODUCTS);
        format!("{adjective} {material} {product}")
    }

    fn word(&self, rng: &mut SeedRng) -> String {
        Self::pick(rng, WORDS)
    }

    fn language_name(&self, rng: &mut SeedRng) -> String {
        Self::pick(rng, LANGUAGES)
    }
}

const NEUTRAL_FIRST_NAMES: &[&str] = &[
    "Addison", "Alexis", "Angel", "Ari", "Arden", "Ashton", "Avery", "Bailey", "Blake", "Briar",
    "Cameron", "Carson", "Casey", "Charlie", "Dakota", "Devon", "Drew", "Eden", "Elliot", "Emerson",
    "Finley", "Harper", "Hayden", "Hunter", "Jamie", "Jordan", "Jules", "Kendall", "Kennedy",
    "Lane", "Logan", "Marley", "Morgan", "Oakley", "Parker", "Peyton", "Quinn", "Reese", "Riley",
    "River", "Rowan", "Sage", "Sawyer", "Skyler", "Spencer", "Sydney", "Taylor", "Toby", "Wren",
];

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adam", "Alice", "Amelia", "Andre", "Anna", "Benjamin", "Bianca", "Carlos",
    "Chloe", "Daniel", "Diana", "Elena", "Ethan", "Fatima", "Gabriel", "Grace", "Hannah", "Isaac",
    "Isabel", "Jacob", "Jasmine", "Kevin", "Laura", "Liam", "Lucia", "Marcus", "Maria", "Mason",
    "Mia", "Nathan", "Nora", "Oliver", "Olivia", "Omar", "Priya", "Rachel", "Samuel", "Sofia",
    "Thomas", "Valeria", "Victor", "Yusuf", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Allen", "Baker", "Brown", "Campbell", "Carter", "Clark", "Collins", "Davis", "Diaz",
    "Edwards", "Evans", "Flores", "Garcia", "Gonzalez", "Green", "Hall", "Harris", "Hernandez",
    "Hill", "Jackson", "Johnson", "King", "Lee", "Lewis", "Lopez", "Martin", "Martinez", "Miller",
    "Mitchell", "Moore", "Nelson", "Nguyen", "Parker", "Perez", "Phillips", "Ramirez", "Roberts",
    "Robinson", "Sanchez", "Scott", "Smith", "Taylor", "Thomas", "Torres", "Walker", "White",
    "Williams", "Wilson", "Young",
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Cedar", "Pine", "Elm", "Willow", "Birch", "Chestnut", "Walnut", "Spruce",
    "Lake", "Hill", "Park", "Washington", "Lincoln", "Jefferson", "Madison", "Franklin", "Church",
    "Mill", "River", "Spring", "Sunset", "Highland", "Meadow",
];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Boulevard", "Way", "Place", "Terrace",
];

const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton", "Fairview",
    "Salem", "Madison", "Georgetown", "Arlington", "Ashland", "Dover", "Oxford", "Jackson",
    "Burlington", "Manchester", "Milton", "Newport", "Auburn",
];

const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Rustic", "Intelligent", "Gorgeous", "Incredible", "Fantastic",
    "Practical", "Sleek", "Awesome", "Enormous", "Mediocre", "Synergistic", "Heavy Duty",
    "Lightweight", "Aerodynamic", "Durable",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Leather", "Silk",
    "Wool", "Linen", "Marble", "Iron", "Bronze", "Copper", "Aluminum", "Paper",
];

const PRODUCTS: &[&str] = &[
    "Chair", "Car", "Computer", "Gloves", "Pants", "Shirt", "Table", "Shoes", "Hat", "Plate",
    "Knife", "Bottle", "Coat", "Lamp", "Keyboard", "Bag", "Bench", "Clock", "Watch", "Wallet",
];

const WORDS: &[&str] = &[
    "alias", "consequatur", "aut", "perferendis", "sit", "voluptatem", "accusantium", "doloremque",
    "aperiam", "eaque", "ipsa", "quae", "ab", "illo", "inventore", "veritatis", "et", "quasi",
    "architecto", "beatae", "vitae", "dicta", "sunt", "explicabo", "aspernatur", "odit", "fugit",
    "sed", "quia", "magni", "dolores", "eos", "ratione", "sequi", "nesciunt", "neque", "dolorem",
    "ipsum", "amet", "adipisci", "velit", "numquam", "eius", "modi", "tempora", "incidunt",
    "labore", "magnam", "aliquam", "quaerat",
];

const LANGUAGES: &[&str] = &[
    "Arabic", "Bengali", "Burmese", "Cantonese", "Czech", "Dutch", "English", "Farsi", "French",
    "German", "Greek", "Gujarati", "Haitian Creole", "Hindi", "Hmong", "Italian", "Japanese",
    "Karen", "Korean", "Mandarin", "Nepali", "Polish", "Portuguese", "Punjabi", "Russian",
    "Somali", "Spanish", "Swahili", "Tagalog", "Tamil", "Telugu", "Thai", "Turkish", "Ukrainian",
    "Urdu", "Vietnamese", "Yoruba",
];
