use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Currency {
    Aud,
    Bgn,
    Brl,
    Cad,
    Chf,
    Cny,
    Czk,
    Dkk,
    Eur,
    Gbp,
    Hkd,
    Hrk,
    Huf,
    Idr,
    Ils,
    Inr,
    Isk,
    Jpy,
    Krw,
    Mxn,
    Myr,
    Nok,
    Nzd,
    Php,
    Pln,
    Ron,
    Rub,
    Sek,
    Sgd,
    Thb,
    Try,
    Usd,
    Zar,
}

// code, display name
static CURRENCIES: [(Currency, &str, &str); 33] = [
    (Currency::Aud, "AUD", "Australian Dollar"),
    (Currency::Bgn, "BGN", "Bulgarian Lev"),
    (Currency::Brl, "BRL", "Brazilian Real"),
    (Currency::Cad, "CAD", "Canadian Dollar"),
    (Currency::Chf, "CHF", "Swiss Franc"),
    (Currency::Cny, "CNY", "Chinese Yuan"),
    (Currency::Czk, "CZK", "Czech Koruna"),
    (Currency::Dkk, "DKK", "Danish Krone"),
    (Currency::Eur, "EUR", "Euro"),
    (Currency::Gbp, "GBP", "British Pound"),
    (Currency::Hkd, "HKD", "Hong Kong Dollar"),
    (Currency::Hrk, "HRK", "Croatian Kuna"),
    (Currency::Huf, "HUF", "Hungarian Forint"),
    (Currency::Idr, "IDR", "Indonesian Rupiah"),
    (Currency::Ils, "ILS", "Israeli New Shekel"),
    (Currency::Inr, "INR", "Indian Rupee"),
    (Currency::Isk, "ISK", "Icelandic Krona"),
    (Currency::Jpy, "JPY", "Japanese Yen"),
    (Currency::Krw, "KRW", "South Korean Won"),
    (Currency::Mxn, "MXN", "Mexican Peso"),
    (Currency::Myr, "MYR", "Malaysian Ringgit"),
    (Currency::Nok, "NOK", "Norwegian Krone"),
    (Currency::Nzd, "NZD", "New Zealand Dollar"),
    (Currency::Php, "PHP", "Philippine Peso"),
    (Currency::Pln, "PLN", "Polish Zloty"),
    (Currency::Ron, "RON", "Romanian Leu"),
    (Currency::Rub, "RUB", "Russian Ruble"),
    (Currency::Sek, "SEK", "Swedish Krona"),
    (Currency::Sgd, "SGD", "Singapore Dollar"),
    (Currency::Thb, "THB", "Thai Baht"),
    (Currency::Try, "TRY", "Turkish Lira"),
    (Currency::Usd, "USD", "US Dollar"),
    (Currency::Zar, "ZAR", "South African Rand"),
];

impl Currency {
    pub fn all() -> impl Iterator<Item = Currency> {
        CURRENCIES.iter().map(|(currency, _, _)| *currency)
    }

    pub fn code(&self) -> &'static str {
        self.lookup_().1
    }

    pub fn name(&self) -> &'static str {
        self.lookup_().2
    }

    fn lookup_(&self) -> &'static (Currency, &'static str, &'static str) {
        // table order follows the enum declaration
        &CURRENCIES[*self as usize]
    }
}

impl std::str::FromStr for Currency {
    type Err = Error;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        CURRENCIES
            .iter()
            .find(|(_, item, _)| *item == code)
            .map(|(currency, _, _)| *currency)
            .ok_or_else(|| Error::new_unknown_currency(format!("no currency with code {code}")))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
