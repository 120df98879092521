use std::fmt;
use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

/// ICAO identifier of an airport
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportCode(pub String);

impl AirportCode {
    pub fn new(code: &str) -> Self {
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An airport the airline can fly to. Immutable reference data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub code: AirportCode,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Airport {
    pub fn new(code: &str, name: &str, lat: f64, lon: f64) -> Self {
        Self {
            code: AirportCode::new(code),
            name: name.to_string(),
            lat,
            lon,
        }
    }
}

/// Draw `n` distinct airports uniformly at random.
///
/// Returns `min(n, source.len())` airports in random order. An empty source
/// is an error unless nothing was asked for.
pub fn sample<R: Rng + ?Sized>(source: &[Airport], n: usize, rng: &mut R) -> GameResult<Vec<Airport>> {
    if source.is_empty() && n > 0 {
        return Err(GameError::EmptyPool);
    }
    let mut picked: Vec<Airport> = source.choose_multiple(rng, n).cloned().collect();
    picked.shuffle(rng);
    Ok(picked)
}

/// Which airports a provider should draw from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolCriteria {
    /// Continent code, e.g. "EU"
    pub region: String,
}

impl PoolCriteria {
    pub fn region(region: &str) -> Self {
        Self {
            region: region.to_string(),
        }
    }
}

/// Source of airport reference data
pub trait AirportProvider {
    /// A working pool of at most `n` airports matching `criteria`
    fn sample<R: Rng + ?Sized>(
        &self,
        criteria: &PoolCriteria,
        n: usize,
        rng: &mut R,
    ) -> GameResult<Vec<Airport>>;

    /// Look up a single airport by code
    fn airport(&self, code: &AirportCode) -> Option<Airport>;
}

/// A catalogue entry: the airport plus the data used to filter it
#[derive(Clone, Debug)]
pub struct CatalogEntry {
    pub airport: Airport,
    pub region: &'static str,
}

/// In-memory airport provider
#[derive(Clone, Debug, Default)]
pub struct AirportCatalog {
    entries: Vec<CatalogEntry>,
}

impl AirportCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Catalogue holding every airport under a single region
    pub fn from_airports(region: &'static str, airports: Vec<Airport>) -> Self {
        Self::new(
            airports
                .into_iter()
                .map(|airport| CatalogEntry { airport, region })
                .collect(),
        )
    }

    /// Large European airports
    pub fn europe() -> Self {
        EUROPE_LARGE_AIRPORTS.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AirportProvider for AirportCatalog {
    fn sample<R: Rng + ?Sized>(
        &self,
        criteria: &PoolCriteria,
        n: usize,
        rng: &mut R,
    ) -> GameResult<Vec<Airport>> {
        let matching: Vec<Airport> = self
            .entries
            .iter()
            .filter(|e| e.region == criteria.region)
            .map(|e| e.airport.clone())
            .collect();
        sample(&matching, n, rng)
    }

    fn airport(&self, code: &AirportCode) -> Option<Airport> {
        self.entries
            .iter()
            .find(|e| &e.airport.code == code)
            .map(|e| e.airport.clone())
    }
}

static EUROPE_LARGE_AIRPORTS: LazyLock<AirportCatalog> = LazyLock::new(|| {
    let airports = [
        ("EGLL", "London Heathrow Airport", 51.4706, -0.461941),
        ("EGKK", "London Gatwick Airport", 51.1481, -0.190278),
        ("EGCC", "Manchester Airport", 53.3537, -2.27495),
        ("EIDW", "Dublin Airport", 53.4213, -6.27007),
        ("LFPG", "Charles de Gaulle International Airport", 49.0097, 2.54797),
        ("LFPO", "Paris-Orly Airport", 48.7253, 2.35944),
        ("LFMN", "Nice-Cote d'Azur Airport", 43.6584, 7.21587),
        ("LFLL", "Lyon Saint-Exupery Airport", 45.7256, 5.08111),
        ("EHAM", "Amsterdam Airport Schiphol", 52.3086, 4.76389),
        ("EBBR", "Brussels Airport", 50.9014, 4.48444),
        ("EDDF", "Frankfurt am Main Airport", 50.0333, 8.57046),
        ("EDDM", "Munich Airport", 48.3538, 11.7861),
        ("EDDB", "Berlin Brandenburg Airport", 52.3514, 13.4939),
        ("EDDH", "Hamburg Airport", 53.6304, 9.98823),
        ("EDDL", "Dusseldorf Airport", 51.2895, 6.76678),
        ("LSZH", "Zurich Airport", 47.4647, 8.54917),
        ("LSGG", "Geneva Cointrin International Airport", 46.2381, 6.10895),
        ("LOWW", "Vienna International Airport", 48.1103, 16.5697),
        ("LKPR", "Vaclav Havel Airport Prague", 50.1008, 14.26),
        ("EPWA", "Warsaw Chopin Airport", 52.1657, 20.9671),
        ("LHBP", "Budapest Liszt Ferenc International Airport", 47.4298, 19.2611),
        ("LROP", "Henri Coanda International Airport", 44.5711, 26.085),
        ("LBSF", "Sofia Airport", 42.6967, 23.4114),
        ("LGAV", "Athens International Airport", 37.9364, 23.9445),
        ("LIRF", "Leonardo da Vinci-Fiumicino Airport", 41.8045, 12.2508),
        ("LIMC", "Malpensa International Airport", 45.6306, 8.72811),
        ("LEMD", "Adolfo Suarez Madrid-Barajas Airport", 40.4719, -3.56264),
        ("LEBL", "Josep Tarradellas Barcelona-El Prat Airport", 41.2971, 2.07846),
        ("LEPA", "Palma de Mallorca Airport", 39.5517, 2.73881),
        ("LPPT", "Humberto Delgado Airport", 38.7813, -9.13592),
        ("EKCH", "Copenhagen Kastrup Airport", 55.6179, 12.656),
        ("ESSA", "Stockholm-Arlanda Airport", 59.6519, 17.9186),
        ("ENGM", "Oslo Airport, Gardermoen", 60.1939, 11.1004),
        ("EFHK", "Helsinki Vantaa Airport", 60.3172, 24.9633),
        ("EVRA", "Riga International Airport", 56.9236, 23.9711),
        ("EETN", "Lennart Meri Tallinn Airport", 59.4133, 24.8328),
        ("BIKF", "Keflavik International Airport", 63.985, -22.6056),
        ("LTFM", "Istanbul Airport", 41.2753, 28.7519),
    ];
    AirportCatalog::from_airports(
        "EU",
        airports
            .into_iter()
            .map(|(code, name, lat, lon)| Airport::new(code, name, lat, lon))
            .collect(),
    )
});
