//! Multi-carrier quote orchestration.
//!
//! [`QuoteEngine`] validates a shipment request, derives its chargeable
//! weight once, and then asks every requested carrier independently. Each
//! carrier moves through resolve, limit check and pricing; a failure at any
//! stage makes that carrier's quote unavailable without affecting the others.
//!
//! Request-level checks run in a fixed order before any carrier is asked:
//! content compliance, information sufficiency, then the shipment weight limit.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    ComplianceGuard, ComplianceVerdict, aggregate_boxes, price_from_breaks, price_from_country,
    price_with_tiers, summarize_uniform,
};
use crate::config::{CarrierSettings, CarrierTables, TableStore, heavyweight_tiers};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BoxSpec, Carrier, DestinationKey, Quote, QuoteOutcome, QuoteSet, QuoteStatus, RejectionReason,
    ShipmentBoxes, ShipmentRequest, UnavailableReason, WeightSummary,
};
use crate::resolution::RegionResolver;

/// Version reported in every quote set.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Missing-field name for the declared contents.
pub const MISSING_CONTENT: &str = "content";
/// Missing-field name for the destination.
pub const MISSING_COUNTRY: &str = "country";
/// Missing-field name when a box has neither weight nor dimensions.
pub const MISSING_MEASUREMENTS: &str = "weight_or_dimensions";
/// Missing-field name when some but not all dimensions of a box were given.
pub const MISSING_DIMENSIONS: &str = "dimensions";
/// Missing-field name for a zero box quantity.
pub const MISSING_QUANTITY: &str = "quantity";

/// Produces comparable quotes from every configured carrier.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use carrier_quote_engine::config::TableStore;
/// use carrier_quote_engine::engine::QuoteEngine;
/// use carrier_quote_engine::models::{
///     BoxSpec, Dimensions, QuoteOutcome, ShipmentBoxes, ShipmentRequest,
/// };
/// use rust_decimal_macros::dec;
///
/// let store = Arc::new(TableStore::load("./config")?);
/// let engine = QuoteEngine::new(store);
///
/// let request = ShipmentRequest {
///     content: "Books".to_string(),
///     country: "Almanya".to_string(),
///     boxes: ShipmentBoxes::Uniform(BoxSpec::new(
///         dec!(5),
///         Dimensions::new(dec!(40), dec!(40), dec!(50)),
///         2,
///     )),
///     carriers: None,
/// };
///
/// if let QuoteOutcome::Quoted(set) = engine.quote(&request) {
///     println!("Best quote: {:?}", set.best_quote());
/// }
/// # Ok::<(), carrier_quote_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    store: Arc<TableStore>,
    guard: ComplianceGuard,
}

impl QuoteEngine {
    /// Creates an engine over loaded reference tables.
    pub fn new(store: Arc<TableStore>) -> Self {
        let guard = ComplianceGuard::new(&store.settings().prohibited_keywords);
        Self { store, guard }
    }

    /// The reference tables this engine prices from.
    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Quotes a shipment.
    pub fn quote(&self, request: &ShipmentRequest) -> QuoteOutcome {
        if let ComplianceVerdict::Prohibited { keyword } = self.guard.check(&request.content) {
            info!(keyword = %keyword, "Request rejected: prohibited content");
            return QuoteOutcome::Rejected {
                reason: RejectionReason::ProhibitedContent { keyword },
            };
        }

        let missing = missing_fields(request);
        if !missing.is_empty() {
            debug!(missing = ?missing, "Request needs more information");
            return QuoteOutcome::NeedsInfo {
                prompt: prompt_for(&missing),
                missing: missing.into_iter().map(str::to_string).collect(),
            };
        }

        let limits = &self.store.settings().limits;
        let Some(summary) = weight_summary(&request.boxes, limits.volumetric_divisor) else {
            // missing_fields already covers unmeasured boxes
            return QuoteOutcome::NeedsInfo {
                prompt: prompt_for(&[MISSING_MEASUREMENTS]),
                missing: vec![MISSING_MEASUREMENTS.to_string()],
            };
        };

        let chargeable_weight = summary.rounded_chargeable_weight();
        if chargeable_weight > limits.max_chargeable_weight_kg {
            info!(
                chargeable_weight = %chargeable_weight,
                limit = %limits.max_chargeable_weight_kg,
                "Request rejected: shipment limit exceeded"
            );
            return QuoteOutcome::Rejected {
                reason: RejectionReason::ShipmentLimitExceeded {
                    chargeable_weight,
                    limit: limits.max_chargeable_weight_kg,
                },
            };
        }

        let mut available = Vec::new();
        let mut unavailable = Vec::new();
        for carrier in request.requested_carriers() {
            let quote = match self.carrier_context(carrier) {
                Ok((settings, tables)) => {
                    quote_carrier(carrier, settings, tables, &request.country, &summary)
                }
                Err(e) => {
                    warn!(carrier = %carrier, error = %e, "Carrier has no tables");
                    self.unconfigured_quote(carrier, e, &summary)
                }
            };
            if quote.is_available() {
                available.push(quote);
            } else {
                unavailable.push(quote);
            }
        }

        // Stable sort keeps declaration order for equal prices
        available.sort_by(|a, b| a.total_price().cmp(&b.total_price()));
        let available_count = available.len();
        let mut quotes = available;
        quotes.extend(unavailable);

        info!(
            destination = %request.country,
            chargeable_weight = %chargeable_weight,
            available = available_count,
            quoted = quotes.len(),
            "Quotes produced"
        );

        QuoteOutcome::Quoted(QuoteSet {
            quote_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            destination: request.country.clone(),
            quotes,
            weight_summary: summary,
        })
    }

    fn carrier_context(&self, carrier: Carrier) -> EngineResult<(&CarrierSettings, &CarrierTables)> {
        Ok((self.store.carrier_settings(carrier)?, self.store.tables(carrier)?))
    }

    fn unconfigured_quote(&self, carrier: Carrier, error: EngineError, summary: &WeightSummary) -> Quote {
        let service_type = self
            .store
            .carrier_settings(carrier)
            .map(|settings| settings.service_type.clone())
            .unwrap_or_default();
        Quote {
            carrier,
            service_type,
            destination: None,
            chargeable_weight: summary.rounded_chargeable_weight(),
            status: unavailable(carrier, error),
        }
    }
}

/// Derives the weight breakdown of a shipment.
///
/// Returns `None` when a box has neither weight nor complete dimensions.
pub fn weight_summary(boxes: &ShipmentBoxes, divisor: Decimal) -> Option<WeightSummary> {
    match boxes {
        ShipmentBoxes::Uniform(spec) => summarize_uniform(spec, divisor).map(WeightSummary::Uniform),
        ShipmentBoxes::Mixed(specs) => aggregate_boxes(specs, divisor).map(WeightSummary::Mixed),
    }
}

fn box_specs(boxes: &ShipmentBoxes) -> &[BoxSpec] {
    match boxes {
        ShipmentBoxes::Uniform(spec) => std::slice::from_ref(spec),
        ShipmentBoxes::Mixed(specs) => specs,
    }
}

/// Names of the inputs still needed before the request can be priced.
fn missing_fields(request: &ShipmentRequest) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if request.content.trim().is_empty() {
        missing.push(MISSING_CONTENT);
    }
    if request.country.trim().is_empty() {
        missing.push(MISSING_COUNTRY);
    }

    let specs = box_specs(&request.boxes);
    if specs.is_empty() || specs.iter().any(|spec| spec.is_unmeasured() && !spec.dimensions.any_given()) {
        missing.push(MISSING_MEASUREMENTS);
    } else if specs.iter().any(BoxSpec::is_unmeasured) {
        missing.push(MISSING_DIMENSIONS);
    }
    if specs.iter().any(|spec| spec.quantity == 0) {
        missing.push(MISSING_QUANTITY);
    }
    missing
}

fn prompt_for(missing: &[&str]) -> String {
    let asks: Vec<&str> = missing
        .iter()
        .map(|field| match *field {
            MISSING_CONTENT => "what the shipment contains",
            MISSING_COUNTRY => "the destination country",
            MISSING_MEASUREMENTS => "the weight or dimensions (L×W×H cm) of each box",
            MISSING_DIMENSIONS => "all three dimensions (L×W×H cm) of each box, or its weight",
            MISSING_QUANTITY => "how many boxes of each kind are sent",
            _ => "the remaining shipment details",
        })
        .collect();
    format!("To prepare a quote, please tell us {}.", asks.join("; "))
}

fn quote_carrier(
    carrier: Carrier,
    settings: &CarrierSettings,
    tables: &CarrierTables,
    destination: &str,
    summary: &WeightSummary,
) -> Quote {
    let weight = summary.rounded_chargeable_weight();
    let quote = |destination: Option<DestinationKey>, status: QuoteStatus| Quote {
        carrier,
        service_type: settings.service_type.clone(),
        destination,
        chargeable_weight: weight,
        status,
    };

    let key = match resolve(carrier, tables, destination) {
        Ok(key) => key,
        Err(e) => return quote(None, unavailable(carrier, e)),
    };
    debug!(carrier = %carrier, key = %key, "Destination resolved for carrier");

    if let Err(e) = check_carrier_limits(carrier, settings, summary) {
        return quote(Some(key), unavailable(carrier, e));
    }

    let total = match price(carrier, tables, &key, weight) {
        Ok(total) if total > Decimal::ZERO => round_money(total),
        Ok(_) => {
            let e = EngineError::PriceNotFound {
                carrier,
                key: key.to_string(),
                weight,
            };
            return quote(Some(key), unavailable(carrier, e));
        }
        Err(e) => return quote(Some(key), unavailable(carrier, e)),
    };

    let boxes = Decimal::from(summary.total_boxes().max(1));
    let price_per_box = round_money(total / boxes);
    debug!(carrier = %carrier, total = %total, "Carrier priced");

    quote(
        Some(key),
        QuoteStatus::Available {
            total_price: total,
            price_per_box,
        },
    )
}

fn unavailable(carrier: Carrier, error: EngineError) -> QuoteStatus {
    let reason = match error {
        EngineError::DestinationNotResolved { .. } => UnavailableReason::DestinationNotServed,
        EngineError::CarrierLimitExceeded { .. } => UnavailableReason::CarrierLimitExceeded,
        EngineError::CarrierNotConfigured { .. } => UnavailableReason::CarrierNotConfigured,
        _ => UnavailableReason::PriceNotFound,
    };
    debug!(carrier = %carrier, reason = ?reason, error = %error, "Carrier unavailable");
    QuoteStatus::Unavailable {
        reason,
        message: error.to_string(),
    }
}

fn resolve(carrier: Carrier, tables: &CarrierTables, destination: &str) -> EngineResult<DestinationKey> {
    let key = match tables {
        CarrierTables::Regional(regional) => RegionResolver::for_table(regional.regions.lookup())
            .resolve(destination)
            .map(|resolution| DestinationKey::Region(resolution.key)),
        CarrierTables::CountryKeyed(table) => {
            RegionResolver::with_aliases(table.lookup(), table.aliases())
                .resolve(destination)
                .map(|resolution| DestinationKey::Country(resolution.key))
        }
    };
    key.ok_or_else(|| EngineError::DestinationNotResolved {
        carrier,
        destination: destination.to_string(),
    })
}

fn check_carrier_limits(
    carrier: Carrier,
    settings: &CarrierSettings,
    summary: &WeightSummary,
) -> EngineResult<()> {
    let Some(limit) = settings.max_box_volumetric_weight_kg else {
        return Ok(());
    };
    let actual = summary.max_box_volumetric_weight();
    if actual > limit {
        return Err(EngineError::CarrierLimitExceeded {
            carrier,
            actual: actual.normalize(),
            limit,
        });
    }
    Ok(())
}

fn price(
    carrier: Carrier,
    tables: &CarrierTables,
    key: &DestinationKey,
    weight: Decimal,
) -> EngineResult<Decimal> {
    let price = match (tables, key) {
        (CarrierTables::Regional(regional), DestinationKey::Region(region)) => {
            match heavyweight_tiers(carrier) {
                Some((tiers, threshold)) => {
                    price_with_tiers(&regional.prices, tiers, threshold, *region, weight)
                }
                None => price_from_breaks(&regional.prices, *region, weight),
            }
        }
        (CarrierTables::CountryKeyed(table), DestinationKey::Country(country)) => table
            .rates(country)
            .and_then(|rates| price_from_country(rates, weight)),
        _ => None,
    };
    price.ok_or_else(|| EngineError::PriceNotFound {
        carrier,
        key: key.to_string(),
        weight,
    })
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
