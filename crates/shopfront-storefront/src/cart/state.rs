use serde::Serialize;
use shopfront_core::{Cart, CartCost, CartLine, LineMerchandise, Money, DISPLAY_CURRENCY};

/// Where the synchronizer stands relative to the remote cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartPhase {
    /// No mutation has run since construction or the last clear.
    #[default]
    Idle,
    /// At least one remote call is in flight.
    Pending,
    /// The last call to settle returned a snapshot.
    Resolved,
    /// The last call to settle failed; the mirror is unchanged.
    Failed,
}

/// Snapshot of the synchronizer for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartView {
    pub phase: CartPhase,
    /// Last snapshot returned by the backend.
    pub confirmed: Option<Cart>,
    /// Projection of the pending mutations, present only while pending.
    pub optimistic: Option<Cart>,
}

impl CartView {
    /// The cart to show right now: the optimistic projection while a
    /// mutation is pending, otherwise the confirmed snapshot.
    #[must_use]
    pub fn display(&self) -> Option<&Cart> {
        self.optimistic.as_ref().or(self.confirmed.as_ref())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase == CartPhase::Pending
    }
}

#[derive(Debug, Default)]
pub(crate) struct SyncState {
    pub(crate) phase: CartPhase,
    pub(crate) confirmed: Option<Cart>,
    optimistic: Option<Cart>,
    in_flight: usize,
}

impl SyncState {
    pub(crate) fn view(&self) -> CartView {
        CartView {
            phase: self.phase,
            confirmed: self.confirmed.clone(),
            optimistic: self.optimistic.clone(),
        }
    }

    /// The cart new projections build on.
    pub(crate) fn base(&self) -> Option<&Cart> {
        self.optimistic.as_ref().or(self.confirmed.as_ref())
    }

    pub(crate) fn begin(&mut self, projection: Option<Cart>) {
        self.in_flight += 1;
        self.phase = CartPhase::Pending;
        if projection.is_some() {
            self.optimistic = projection;
        }
    }

    /// Replaces the mirror wholesale with whatever arrived last.
    pub(crate) fn resolve(&mut self, snapshot: Option<Cart>) {
        self.confirmed = snapshot;
        self.finish(CartPhase::Resolved);
    }

    pub(crate) fn fail(&mut self) {
        self.finish(CartPhase::Failed);
    }

    pub(crate) fn purge(&mut self) {
        self.confirmed = None;
        self.finish(CartPhase::Failed);
    }

    fn finish(&mut self, phase: CartPhase) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.phase = phase;
            self.optimistic = None;
        }
    }
}

/// Projects an add: bumps the existing line for the variant, else appends a
/// provisional line when merchandise details are known. A bumped line never
/// exceeds `max_line_quantity`.
pub(crate) fn project_addition(
    base: Option<&Cart>,
    variant_id: &str,
    quantity: u32,
    max_line_quantity: u32,
    preview: Option<&LineMerchandise>,
) -> Cart {
    let mut cart = base.cloned().unwrap_or_else(blank_cart);
    if let Some(line) = cart
        .lines
        .iter_mut()
        .find(|l| l.merchandise.variant_id == variant_id)
    {
        line.quantity = line
            .quantity
            .saturating_add(quantity)
            .min(max_line_quantity);
    } else if let Some(merchandise) = preview {
        cart.lines.push(CartLine {
            id: format!("pending:{variant_id}"),
            quantity,
            merchandise: merchandise.clone(),
            cost: None,
        });
    } else {
        cart.total_quantity = cart.total_quantity.saturating_add(quantity);
        return cart;
    }
    cart.total_quantity = cart.line_quantity();
    cart
}

pub(crate) fn project_quantity(base: &Cart, line_id: &str, quantity: u32) -> Cart {
    let mut cart = base.clone();
    if let Some(line) = cart.lines.iter_mut().find(|l| l.id == line_id) {
        line.quantity = quantity;
    }
    cart.total_quantity = cart.line_quantity();
    cart
}

pub(crate) fn project_removal(base: &Cart, line_id: &str) -> Cart {
    let mut cart = base.clone();
    cart.lines.retain(|l| l.id != line_id);
    cart.total_quantity = cart.line_quantity();
    cart
}

fn blank_cart() -> Cart {
    Cart {
        id: String::new(),
        checkout_url: String::new(),
        total_quantity: 0,
        lines: Vec::new(),
        cost: CartCost {
            subtotal: Money::zero(DISPLAY_CURRENCY),
            total: Money::zero(DISPLAY_CURRENCY),
            total_tax: None,
        },
        discount_codes: Vec::new(),
    }
}
