//! Commerce client for one store.
//!
//! Each operation is self-contained: it acquires its own token, keeps its
//! own trail and shares nothing with concurrent calls.

use shopdesk_core::{
    AbortInfo, Credential, DayResult, ListingDebug, OrderListingRequest, OrderListingResponse,
    Product, parse_request_date,
};
use shopdesk_fetch::FetchContext;
use tracing::{info, instrument, warn};

use crate::api::Endpoints;
use crate::auth::{AttemptPlan, SignedAttempt, TokenAcquirer, TokenAcquisition};
use crate::error::CommerceError;
use crate::orders::{DateRangeChunker, DayOutcome, OrderFetcher, OrderQuery, ResponseNormalizer};
use crate::products::{ProductResolver, Resolution, fetch_product_detail, normalize_product};

/// A product plus how its identifier was resolved.
#[derive(Debug, Clone)]
pub struct ProductLookup {
    /// The normalized product.
    pub product: Product,
    /// Resolution of the caller's identifier.
    pub resolution: Resolution,
}

/// Client bound to one store's credentials.
#[derive(Debug, Clone)]
pub struct CommerceClient {
    name: String,
    credential: Credential,
    ctx: FetchContext,
    endpoints: Endpoints,
}

impl CommerceClient {
    /// Creates a client against the production endpoints.
    pub fn new(name: impl Into<String>, credential: Credential, ctx: FetchContext) -> Self {
        Self {
            name: name.into(),
            credential,
            ctx,
            endpoints: Endpoints::default(),
        }
    }

    /// Uses different endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store credentials.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Endpoints in use.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// The token-attempt plan as it would run now.
    pub fn attempt_plan(&self) -> AttemptPlan {
        AttemptPlan::build(&self.credential, self.ctx.now())
    }

    /// Signs the attempt plan without sending anything.
    ///
    /// # Errors
    ///
    /// See [`TokenAcquirer::prepare`].
    pub fn prepare_attempts(&self) -> Result<Vec<SignedAttempt>, CommerceError> {
        TokenAcquirer::new(&self.ctx, &self.endpoints).prepare(&self.credential)
    }

    /// Acquires a fresh token.
    ///
    /// # Errors
    ///
    /// See [`TokenAcquirer::acquire`].
    pub async fn acquire_token(&self) -> Result<TokenAcquisition, CommerceError> {
        TokenAcquirer::new(&self.ctx, &self.endpoints)
            .acquire(&self.credential)
            .await
    }

    /// Lists orders for an inclusive date range, one day at a time.
    ///
    /// Days that exhaust every candidate are reported in
    /// `debug.failedDays`. A 401/403 stops the loop; if earlier days
    /// produced data they are still returned, with the abort recorded in
    /// `debug.abortedAt`.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::InvalidRequest`] for unreadable or reversed dates.
    /// - Token errors from [`Self::acquire_token`].
    /// - [`CommerceError::HardAuthorizationFailure`] if the first attempted
    ///   day was rejected.
    /// - [`CommerceError::TotalFailure`] if no day produced data.
    #[instrument(skip_all, fields(store = %self.name, from = %request.date_from, to = %request.date_to))]
    pub async fn list_orders(
        &self,
        request: &OrderListingRequest,
    ) -> Result<OrderListingResponse, CommerceError> {
        let date_from = parse_request_date(&request.date_from)?;
        let date_to = parse_request_date(&request.date_to)?;
        let range = DateRangeChunker::new(self.ctx.max_days()).split(date_from, date_to)?;
        if range.truncated {
            warn!(omitted_days = range.omitted_days, "Date range exceeds the day cap");
        }

        let acquisition = self.acquire_token().await?;
        let fetcher = OrderFetcher::new(
            self.ctx.http.as_ref(),
            &self.endpoints,
            &acquisition.token,
            OrderQuery::from_request(request),
        );
        let fetched = fetcher.fetch_range(&range.windows).await;
        let failed_days = fetched.failed_days();
        let aborted = fetched.aborted();

        if !fetched.has_data() {
            return Err(match aborted {
                Some((day, status)) => CommerceError::HardAuthorizationFailure {
                    status,
                    day: Some(day),
                    token_trail: acquisition.trail,
                    fetch_trail: fetched.trail,
                },
                None => CommerceError::TotalFailure {
                    last_status: fetched.last_status(),
                    failed_days,
                    token_trail: acquisition.trail,
                    fetch_trail: fetched.trail,
                },
            });
        }

        let normalizer = ResponseNormalizer::default();
        let mut sources: Vec<String> = Vec::new();
        let mut fetched_days = Vec::new();
        let mut day_results = Vec::with_capacity(fetched.days.len());
        let mut orders = Vec::new();

        for outcome in &fetched.days {
            match outcome {
                DayOutcome::Fetched {
                    day,
                    candidate,
                    body,
                } => {
                    let rows = normalizer.normalize(body);
                    day_results.push(DayResult {
                        day: *day,
                        candidate: Some(candidate.clone()),
                        rows: rows.len(),
                    });
                    fetched_days.push(*day);
                    if !sources.contains(candidate) {
                        sources.push(candidate.clone());
                    }
                    orders.extend(rows);
                }
                DayOutcome::Exhausted { day, .. } | DayOutcome::Aborted { day, .. } => {
                    day_results.push(DayResult {
                        day: *day,
                        candidate: None,
                        rows: 0,
                    });
                }
            }
        }

        info!(
            days = fetched_days.len(),
            failed = failed_days.len(),
            orders = orders.len(),
            "Order listing complete"
        );

        Ok(OrderListingResponse {
            sources,
            date_from,
            date_to,
            fetched_days,
            orders,
            debug: ListingDebug {
                token_attempts: acquisition.trail,
                order_fetch_attempts: fetched.trail,
                day_results,
                failed_days,
                skipped_days: fetched.skipped_days,
                truncated: range.truncated,
                omitted_days: range.omitted_days,
                aborted_at: aborted.map(|(day, status)| AbortInfo { day, status }),
            },
        })
    }

    /// Looks up a product by channel or origin id.
    ///
    /// # Errors
    ///
    /// - [`CommerceError::InvalidRequest`] for a blank identifier.
    /// - Token errors from [`Self::acquire_token`].
    /// - Detail errors from [`fetch_product_detail`].
    #[instrument(skip(self), fields(store = %self.name))]
    pub async fn lookup_product(&self, identifier: &str) -> Result<ProductLookup, CommerceError> {
        if identifier.trim().is_empty() {
            return Err(CommerceError::InvalidRequest(
                "originProductId is required".to_string(),
            ));
        }

        let acquisition = self.acquire_token().await?;
        let transport = self.ctx.http.as_ref();
        let resolution = ProductResolver::new(transport, &self.endpoints, &acquisition.token)
            .resolve(identifier)
            .await;
        let origin_product_id = resolution.identifier().to_string();

        let body = fetch_product_detail(
            transport,
            &self.endpoints,
            &acquisition.token,
            &origin_product_id,
        )
        .await
        .map_err(|err| match err {
            CommerceError::HardAuthorizationFailure {
                status,
                day,
                fetch_trail,
                ..
            } => CommerceError::HardAuthorizationFailure {
                status,
                day,
                token_trail: acquisition.trail.clone(),
                fetch_trail,
            },
            other => other,
        })?;

        info!(%origin_product_id, resolved = resolution.is_resolved(), "Product fetched");
        Ok(ProductLookup {
            product: normalize_product(&body, &origin_product_id),
            resolution,
        })
    }
}
