//! # Locale Formatting
//!
//! Currency, date and message formatting for the five supported locales.
//!
//! ## Supported Locales
//! ```text
//! ┌──────────┬──────────────┬──────────────┬─────────────────────────────┐
//! │ Tag      │ Currency     │ Short date   │ No-reviews line             │
//! ├──────────┼──────────────┼──────────────┼─────────────────────────────┤
//! │ en-US    │ $1,234.56    │ 10/25/25     │ No reviews                  │
//! │ en-GB    │ £1,234.56    │ 25/10/2025   │ No reviews                  │
//! │ ru-RU    │ 1 234,56 ₽   │ 25.10.2025   │ Нет отзывов                 │
//! │ fr-FR    │ 1 234,56 €   │ 25/10/2025   │ Aucun avis                  │
//! │ zh-CN    │ ¥1,234.56    │ 2025/10/25   │ 暂无评价                    │
//! └──────────┴──────────────┴──────────────┴─────────────────────────────┘
//! ```
//!
//! An unknown tag resolves to en-GB.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use shopfront_core::{Money, Product, ProductKind, Rating, Review};

// =============================================================================
// Locale
// =============================================================================

/// A supported presentation locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[serde(rename = "en-US")]
    EnUs,
    #[default]
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "ru-RU")]
    RuRu,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    pub const ALL: [Locale; 5] = [
        Locale::EnUs,
        Locale::EnGb,
        Locale::RuRu,
        Locale::FrFr,
        Locale::ZhCn,
    ];

    /// BCP-47 language tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::RuRu => "ru-RU",
            Locale::FrFr => "fr-FR",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// Exact tag match, `None` for anything unsupported.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        Locale::ALL.into_iter().find(|l| l.tag() == tag.trim())
    }

    pub fn from_tag_or_default(tag: &str) -> Locale {
        Locale::from_tag(tag).unwrap_or_default()
    }

    fn currency(self) -> CurrencyStyle {
        match self {
            Locale::EnUs => CurrencyStyle::prefix("$", ',', '.'),
            Locale::EnGb => CurrencyStyle::prefix("£", ',', '.'),
            Locale::ZhCn => CurrencyStyle::prefix("¥", ',', '.'),
            Locale::RuRu => CurrencyStyle::suffix("₽", '\u{a0}', ','),
            Locale::FrFr => CurrencyStyle::suffix("€", '\u{202f}', ','),
        }
    }

    fn date_pattern(self) -> &'static str {
        match self {
            Locale::EnUs => "%-m/%-d/%y",
            Locale::EnGb | Locale::FrFr => "%d/%m/%Y",
            Locale::RuRu => "%d.%m.%Y",
            Locale::ZhCn => "%Y/%-m/%-d",
        }
    }

    fn messages(self) -> &'static Messages {
        match self {
            Locale::EnUs | Locale::EnGb => &ENGLISH,
            Locale::RuRu => &RUSSIAN,
            Locale::FrFr => &FRENCH,
            Locale::ZhCn => &CHINESE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Tags accepted by [`ResourceFormatter::for_tag`].
pub fn supported_locales() -> Vec<&'static str> {
    Locale::ALL.iter().map(|l| l.tag()).collect()
}

// =============================================================================
// Currency Style
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct CurrencyStyle {
    symbol: &'static str,
    symbol_first: bool,
    grouping: char,
    decimal: char,
}

impl CurrencyStyle {
    const fn prefix(symbol: &'static str, grouping: char, decimal: char) -> Self {
        CurrencyStyle {
            symbol,
            symbol_first: true,
            grouping,
            decimal,
        }
    }

    const fn suffix(symbol: &'static str, grouping: char, decimal: char) -> Self {
        CurrencyStyle {
            symbol,
            symbol_first: false,
            grouping,
            decimal,
        }
    }

    fn format(&self, amount: Money) -> String {
        let digits = amount.units().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.grouping);
            }
            grouped.push(c);
        }

        let sign = if amount.is_negative() { "-" } else { "" };
        let number = format!("{}{}{:02}", grouped, self.decimal, amount.cents_part());

        if self.symbol_first {
            format!("{}{}{}", sign, self.symbol, number)
        } else {
            format!("{}{}\u{a0}{}", sign, number, self.symbol)
        }
    }
}

// =============================================================================
// Message Catalog
// =============================================================================

/// Templates use `{name}` style placeholders.
struct Messages {
    food_line: &'static str,
    drink_line: &'static str,
    review_line: &'static str,
    food: &'static str,
    drink: &'static str,
    no_reviews: &'static str,
}

static ENGLISH: Messages = Messages {
    food_line: "{name}, price: {price}, rating: {stars}, best before: {date} ({kind})",
    drink_line: "{name}, price: {price}, rating: {stars} ({kind})",
    review_line: "Review: {stars}\t{comment}",
    food: "food",
    drink: "drink",
    no_reviews: "No reviews",
};

static RUSSIAN: Messages = Messages {
    food_line: "{name}, цена: {price}, рейтинг: {stars}, годен до: {date} ({kind})",
    drink_line: "{name}, цена: {price}, рейтинг: {stars} ({kind})",
    review_line: "Отзыв: {stars}\t{comment}",
    food: "еда",
    drink: "напиток",
    no_reviews: "Нет отзывов",
};

static FRENCH: Messages = Messages {
    food_line: "{name}, prix : {price}, note : {stars}, à consommer avant : {date} ({kind})",
    drink_line: "{name}, prix : {price}, note : {stars} ({kind})",
    review_line: "Avis : {stars}\t{comment}",
    food: "nourriture",
    drink: "boisson",
    no_reviews: "Aucun avis",
};

static CHINESE: Messages = Messages {
    food_line: "{name}，价格：{price}，评分：{stars}，保质期至：{date}（{kind}）",
    drink_line: "{name}，价格：{price}，评分：{stars}（{kind}）",
    review_line: "评价：{stars}\t{comment}",
    food: "食品",
    drink: "饮料",
    no_reviews: "暂无评价",
};

/// Single pass over the template so argument text is never re-expanded.
fn render(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replaced = after.find('}').and_then(|close| {
            let key = &after[..close];
            args.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });

        match replaced {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

// =============================================================================
// Resource Formatter
// =============================================================================

/// Formats catalog values for one locale.
///
/// ## Usage
/// ```rust
/// use shopfront_core::Money;
/// use shopfront_store::locale::ResourceFormatter;
///
/// let formatter = ResourceFormatter::for_tag("en-US");
/// assert_eq!(formatter.format_currency(Money::from_cents(1500)), "$15.00");
///
/// // unknown tags fall back to en-GB
/// let formatter = ResourceFormatter::for_tag("xx-XX");
/// assert_eq!(formatter.format_currency(Money::from_cents(1500)), "£15.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceFormatter {
    locale: Locale,
}

impl ResourceFormatter {
    pub const fn new(locale: Locale) -> Self {
        ResourceFormatter { locale }
    }

    pub fn for_tag(tag: &str) -> Self {
        ResourceFormatter::new(Locale::from_tag_or_default(tag))
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format_currency(&self, amount: Money) -> String {
        self.locale.currency().format(amount)
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.locale.date_pattern()).to_string()
    }

    pub fn stars_text(&self, rating: Rating) -> &'static str {
        rating.stars()
    }

    /// "food" or "drink" in this locale.
    pub fn localized_word(&self, kind: &ProductKind) -> &'static str {
        let messages = self.locale.messages();
        match kind {
            ProductKind::Food { .. } => messages.food,
            ProductKind::Drink => messages.drink,
        }
    }

    pub fn localized_no_reviews(&self) -> &'static str {
        self.locale.messages().no_reviews
    }

    /// One product line. Drinks have no best-before part.
    pub fn format_product(&self, product: &Product) -> String {
        let messages = self.locale.messages();
        let kind = product.kind();
        let price = self.format_currency(product.price());
        let stars = self.stars_text(product.rating());
        let word = self.localized_word(&kind);

        match kind {
            ProductKind::Food { best_before } => {
                let date = self.format_date(best_before);
                render(
                    messages.food_line,
                    &[
                        ("name", product.name()),
                        ("price", &price),
                        ("stars", stars),
                        ("date", &date),
                        ("kind", word),
                    ],
                )
            }
            ProductKind::Drink => render(
                messages.drink_line,
                &[
                    ("name", product.name()),
                    ("price", &price),
                    ("stars", stars),
                    ("kind", word),
                ],
            ),
        }
    }

    pub fn format_review(&self, review: &Review) -> String {
        render(
            self.locale.messages().review_line,
            &[
                ("stars", self.stars_text(review.rating)),
                ("comment", &review.comment),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_tag_round_trip() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_tag(locale.tag()), Some(locale));
        }
        assert_eq!(supported_locales().len(), 5);
        assert!(supported_locales().contains(&"zh-CN"));
    }

    #[test]
    fn test_unknown_tag_falls_back_to_en_gb() {
        assert_eq!(Locale::from_tag("de-DE"), None);
        assert_eq!(ResourceFormatter::for_tag("de-DE").locale(), Locale::EnGb);
        assert_eq!(ResourceFormatter::for_tag("").locale(), Locale::EnGb);
    }

    #[test]
    fn test_format_currency() {
        let amount = Money::from_cents(123_456);
        let fmt = |tag| ResourceFormatter::for_tag(tag).format_currency(amount);

        assert_eq!(fmt("en-US"), "$1,234.56");
        assert_eq!(fmt("en-GB"), "£1,234.56");
        assert_eq!(fmt("zh-CN"), "¥1,234.56");
        assert_eq!(fmt("ru-RU"), "1\u{a0}234,56\u{a0}₽");
        assert_eq!(fmt("fr-FR"), "1\u{202f}234,56\u{a0}€");
    }

    #[test]
    fn test_format_currency_small_and_negative() {
        let us = ResourceFormatter::new(Locale::EnUs);
        assert_eq!(us.format_currency(Money::from_cents(1500)), "$15.00");
        assert_eq!(us.format_currency(Money::zero()), "$0.00");
        assert_eq!(us.format_currency(Money::from_cents(-5)), "-$0.05");
        assert_eq!(
            us.format_currency(Money::from_cents(100_000_000)),
            "$1,000,000.00"
        );
    }

    #[test]
    fn test_format_date() {
        let d = date(2025, 10, 5);
        let fmt = |locale| ResourceFormatter::new(locale).format_date(d);

        assert_eq!(fmt(Locale::EnUs), "10/5/25");
        assert_eq!(fmt(Locale::EnGb), "05/10/2025");
        assert_eq!(fmt(Locale::RuRu), "05.10.2025");
        assert_eq!(fmt(Locale::FrFr), "05/10/2025");
        assert_eq!(fmt(Locale::ZhCn), "2025/10/5");
    }

    #[test]
    fn test_format_product_lines() {
        let cake = Product::food(
            101,
            "Cake",
            Money::from_cents(399),
            Rating::FourStar,
            date(2025, 10, 25),
        );
        let tea = Product::drink(102, "Tea", Money::from_cents(199), Rating::NotRated);
        let gb = ResourceFormatter::new(Locale::EnGb);

        assert_eq!(
            gb.format_product(&cake),
            "Cake, price: £3.99, rating: ★★★★☆, best before: 25/10/2025 (food)"
        );
        assert_eq!(
            gb.format_product(&tea),
            "Tea, price: £1.99, rating: ☆☆☆☆☆ (drink)"
        );
    }

    #[test]
    fn test_placeholder_in_name_is_not_expanded() {
        let odd = Product::drink(1, "{price}", Money::from_cents(100), Rating::NotRated);
        let line = ResourceFormatter::default().format_product(&odd);
        assert!(line.starts_with("{price}, price: £1.00"));
    }

    #[test]
    fn test_localized_words() {
        let fr = ResourceFormatter::new(Locale::FrFr);
        assert_eq!(fr.localized_word(&ProductKind::Drink), "boisson");
        assert_eq!(fr.localized_no_reviews(), "Aucun avis");
        assert_eq!(
            fr.format_review(&Review::new(Rating::TwoStar, "bof")),
            "Avis : ★★☆☆☆\tbof"
        );
    }
}
