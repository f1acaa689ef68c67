//! Country and continent reference data.
//!
//! A static table of country names, ISO 3166-1 alpha-2 codes, continent
//! assignments, and common aliases, with a tolerant lookup used to resolve
//! the trailing segment of free-text infobox locations. Coverage favors
//! countries with named mountains; unlisted microstates simply fail to
//! resolve and the record is skipped at save time.

/// One reference country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryRef {
    /// Canonical display name, used in feature properties and paths.
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code.
    pub alpha2: &'static str,
    /// Continent display name.
    pub continent: &'static str,
    /// Alternate spellings and colloquial names, lowercase.
    pub aliases: &'static [&'static str],
}

/// Reference table, grouped by continent.
///
/// The `Wyoming` entry is deliberate: a slice of source articles label US
/// peaks with a bare state as their trailing location segment, which the
/// upstream data treated as a country; the output-path override maps it
/// back to the United States.
pub const COUNTRIES: &[CountryRef] = &[
    // ── North America ───────────────────────────────────────────────
    c("United States", "US", "North America", &["us", "u.s.", "usa", "united states of america", "america"]),
    c("Canada", "CA", "North America", &[]),
    c("Mexico", "MX", "North America", &["méxico"]),
    c("Guatemala", "GT", "North America", &[]),
    c("Honduras", "HN", "North America", &[]),
    c("El Salvador", "SV", "North America", &[]),
    c("Nicaragua", "NI", "North America", &[]),
    c("Costa Rica", "CR", "North America", &[]),
    c("Panama", "PA", "North America", &["panamá"]),
    c("Belize", "BZ", "North America", &[]),
    c("Cuba", "CU", "North America", &[]),
    c("Haiti", "HT", "North America", &[]),
    c("Dominican Republic", "DO", "North America", &[]),
    c("Jamaica", "JM", "North America", &[]),
    c("Puerto Rico", "PR", "North America", &[]),
    c("Greenland", "GL", "North America", &[]),
    c("Virgin Islands, British", "VG", "North America", &["british virgin islands"]),
    c("Dominica", "DM", "North America", &[]),
    c("Saint Lucia", "LC", "North America", &[]),
    c("Saint Kitts and Nevis", "KN", "North America", &[]),
    c("Trinidad and Tobago", "TT", "North America", &[]),
    c("Wyoming", "US", "North America", &[]),
    // ── South America ───────────────────────────────────────────────
    c("Argentina", "AR", "South America", &[]),
    c("Chile", "CL", "South America", &[]),
    c("Peru", "PE", "South America", &["perú"]),
    c("Bolivia", "BO", "South America", &["plurinational state of bolivia"]),
    c("Ecuador", "EC", "South America", &[]),
    c("Colombia", "CO", "South America", &[]),
    c("Venezuela", "VE", "South America", &["bolivarian republic of venezuela"]),
    c("Brazil", "BR", "South America", &["brasil"]),
    c("Guyana", "GY", "South America", &[]),
    c("Suriname", "SR", "South America", &[]),
    c("Paraguay", "PY", "South America", &[]),
    c("Uruguay", "UY", "South America", &[]),
    // ── Europe ──────────────────────────────────────────────────────
    c("United Kingdom", "GB", "Europe", &["uk", "great britain", "britain", "england", "scotland", "wales", "northern ireland"]),
    c("Ireland", "IE", "Europe", &["republic of ireland"]),
    c("France", "FR", "Europe", &[]),
    c("Spain", "ES", "Europe", &["españa"]),
    c("Portugal", "PT", "Europe", &[]),
    c("Andorra", "AD", "Europe", &[]),
    c("Italy", "IT", "Europe", &["italia"]),
    c("Switzerland", "CH", "Europe", &["schweiz", "suisse"]),
    c("Austria", "AT", "Europe", &["österreich"]),
    c("Germany", "DE", "Europe", &["deutschland"]),
    c("Liechtenstein", "LI", "Europe", &[]),
    c("Belgium", "BE", "Europe", &[]),
    c("Netherlands", "NL", "Europe", &["holland"]),
    c("Luxembourg", "LU", "Europe", &[]),
    c("Norway", "NO", "Europe", &["norge"]),
    c("Sweden", "SE", "Europe", &["sverige"]),
    c("Finland", "FI", "Europe", &["suomi"]),
    c("Denmark", "DK", "Europe", &[]),
    c("Iceland", "IS", "Europe", &["ísland"]),
    c("Poland", "PL", "Europe", &["polska"]),
    c("Czech Republic", "CZ", "Europe", &["czechia"]),
    c("Slovakia", "SK", "Europe", &[]),
    c("Hungary", "HU", "Europe", &[]),
    c("Slovenia", "SI", "Europe", &[]),
    c("Croatia", "HR", "Europe", &[]),
    c("Bosnia and Herzegovina", "BA", "Europe", &["bosnia"]),
    c("Serbia", "RS", "Europe", &[]),
    c("Montenegro", "ME", "Europe", &[]),
    c("Albania", "AL", "Europe", &[]),
    c("North Macedonia", "MK", "Europe", &["macedonia"]),
    c("Greece", "GR", "Europe", &["hellas"]),
    c("Bulgaria", "BG", "Europe", &[]),
    c("Romania", "RO", "Europe", &[]),
    c("Ukraine", "UA", "Europe", &[]),
    c("Russia", "RU", "Europe", &["russian federation"]),
    c("Belarus", "BY", "Europe", &[]),
    c("Estonia", "EE", "Europe", &[]),
    c("Latvia", "LV", "Europe", &[]),
    c("Lithuania", "LT", "Europe", &[]),
    c("Moldova", "MD", "Europe", &[]),
    c("Malta", "MT", "Europe", &[]),
    c("Cyprus", "CY", "Europe", &[]),
    c("San Marino", "SM", "Europe", &[]),
    // ── Asia ────────────────────────────────────────────────────────
    c("Nepal", "NP", "Asia", &[]),
    c("China", "CN", "Asia", &["people's republic of china", "prc"]),
    c("India", "IN", "Asia", &[]),
    c("Pakistan", "PK", "Asia", &[]),
    c("Afghanistan", "AF", "Asia", &[]),
    c("Bhutan", "BT", "Asia", &[]),
    c("Bangladesh", "BD", "Asia", &[]),
    c("Sri Lanka", "LK", "Asia", &[]),
    c("Myanmar", "MM", "Asia", &["burma"]),
    c("Thailand", "TH", "Asia", &[]),
    c("Laos", "LA", "Asia", &["lao people's democratic republic"]),
    c("Vietnam", "VN", "Asia", &["viet nam"]),
    c("Cambodia", "KH", "Asia", &[]),
    c("Malaysia", "MY", "Asia", &[]),
    c("Indonesia", "ID", "Asia", &[]),
    c("Philippines", "PH", "Asia", &["the philippines"]),
    c("Japan", "JP", "Asia", &["nippon"]),
    c("South Korea", "KR", "Asia", &["korea, republic of", "republic of korea"]),
    c("North Korea", "KP", "Asia", &["korea, democratic people's republic of"]),
    c("Mongolia", "MN", "Asia", &[]),
    c("Taiwan", "TW", "Asia", &["taiwan, province of china"]),
    c("Kazakhstan", "KZ", "Asia", &[]),
    c("Kyrgyzstan", "KG", "Asia", &["kirghizia"]),
    c("Tajikistan", "TJ", "Asia", &[]),
    c("Uzbekistan", "UZ", "Asia", &[]),
    c("Turkmenistan", "TM", "Asia", &[]),
    c("Iran", "IR", "Asia", &["islamic republic of iran", "persia"]),
    c("Iraq", "IQ", "Asia", &[]),
    c("Turkey", "TR", "Asia", &["türkiye"]),
    c("Georgia", "GE", "Asia", &[]),
    c("Armenia", "AM", "Asia", &[]),
    c("Azerbaijan", "AZ", "Asia", &[]),
    c("Syria", "SY", "Asia", &["syrian arab republic"]),
    c("Lebanon", "LB", "Asia", &[]),
    c("Israel", "IL", "Asia", &[]),
    c("Jordan", "JO", "Asia", &[]),
    c("Saudi Arabia", "SA", "Asia", &[]),
    c("Yemen", "YE", "Asia", &[]),
    c("Oman", "OM", "Asia", &[]),
    c("United Arab Emirates", "AE", "Asia", &["uae"]),
    // ── Africa ──────────────────────────────────────────────────────
    c("Tanzania", "TZ", "Africa", &["tanzania, united republic of", "united republic of tanzania"]),
    c("Kenya", "KE", "Africa", &[]),
    c("Uganda", "UG", "Africa", &[]),
    c("Rwanda", "RW", "Africa", &[]),
    c("Burundi", "BI", "Africa", &[]),
    c("Democratic Republic of the Congo", "CD", "Africa", &["dr congo", "congo, the democratic republic of the", "zaire"]),
    c("Ethiopia", "ET", "Africa", &[]),
    c("Eritrea", "ER", "Africa", &[]),
    c("Sudan", "SD", "Africa", &[]),
    c("South Sudan", "SS", "Africa", &[]),
    c("Morocco", "MA", "Africa", &[]),
    c("Algeria", "DZ", "Africa", &[]),
    c("Tunisia", "TN", "Africa", &[]),
    c("Libya", "LY", "Africa", &[]),
    c("Egypt", "EG", "Africa", &[]),
    c("South Africa", "ZA", "Africa", &[]),
    c("Lesotho", "LS", "Africa", &[]),
    c("Eswatini", "SZ", "Africa", &["swaziland"]),
    c("Namibia", "NA", "Africa", &[]),
    c("Botswana", "BW", "Africa", &[]),
    c("Zimbabwe", "ZW", "Africa", &[]),
    c("Zambia", "ZM", "Africa", &[]),
    c("Malawi", "MW", "Africa", &[]),
    c("Mozambique", "MZ", "Africa", &[]),
    c("Madagascar", "MG", "Africa", &[]),
    c("Cameroon", "CM", "Africa", &[]),
    c("Nigeria", "NG", "Africa", &[]),
    c("Ghana", "GH", "Africa", &[]),
    c("Guinea", "GN", "Africa", &[]),
    c("Mali", "ML", "Africa", &[]),
    c("Niger", "NE", "Africa", &[]),
    c("Chad", "TD", "Africa", &[]),
    c("Angola", "AO", "Africa", &[]),
    c("Cape Verde", "CV", "Africa", &["cabo verde"]),
    c("Réunion", "RE", "Africa", &["reunion"]),
    // ── Oceania ─────────────────────────────────────────────────────
    c("Australia", "AU", "Oceania", &[]),
    c("New Zealand", "NZ", "Oceania", &["aotearoa"]),
    c("Papua New Guinea", "PG", "Oceania", &[]),
    c("Fiji", "FJ", "Oceania", &[]),
    c("Vanuatu", "VU", "Oceania", &[]),
    c("Solomon Islands", "SB", "Oceania", &[]),
    c("Samoa", "WS", "Oceania", &[]),
    c("Tonga", "TO", "Oceania", &[]),
    c("New Caledonia", "NC", "Oceania", &[]),
    c("French Polynesia", "PF", "Oceania", &[]),
    // ── Antarctica ──────────────────────────────────────────────────
    c("Antarctica", "AQ", "Antarctica", &[]),
];

/// Shorthand constructor keeping the table rows on one line each.
const fn c(
    name: &'static str,
    alpha2: &'static str,
    continent: &'static str,
    aliases: &'static [&'static str],
) -> CountryRef {
    CountryRef {
        name,
        alpha2,
        continent,
        aliases,
    }
}

/// Looks up a country by name, tolerantly.
///
/// Match order: exact canonical name, exact alias, then prefix and
/// substring containment in either direction. All comparisons are
/// case-insensitive. Returns `None` when nothing plausibly matches;
/// callers treat that as an unresolvable location.
#[must_use]
pub fn search(query: &str) -> Option<&'static CountryRef> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    if let Some(country) = COUNTRIES.iter().find(|c| c.name.to_lowercase() == q) {
        return Some(country);
    }
    if let Some(country) = COUNTRIES.iter().find(|c| c.aliases.contains(&q.as_str())) {
        return Some(country);
    }

    // Tolerant fallback: "U.S. state of Alaska" style fragments and
    // truncated names still land on the right row.
    COUNTRIES.iter().find(|c| {
        let name = c.name.to_lowercase();
        name.starts_with(&q)
            || q.contains(&name)
            || c.aliases.iter().any(|a| a.len() > 3 && q.contains(a))
    })
}
