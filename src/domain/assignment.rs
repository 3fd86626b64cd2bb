use crate::config::constant::SELL_START_INDEX;

/// One candidate solution: which sellable market each requested product is
/// bought from.
///
/// `slots[k]` holds the product positions assigned to market
/// `SELL_START_INDEX + k`; every sellable market owns a slot, possibly
/// empty. `product_market` is the reverse index (product position -> market
/// index) kept in lockstep so the neighborhood operator can remove a
/// product without scanning every slot.
///
/// Invariant: each product position 0..M appears in exactly one slot, and
/// `product_market[p]` names the market whose slot contains `p`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    slots: Vec<Vec<usize>>,
    product_market: Vec<usize>,
}

impl Assignment {
    /// An assignment with every slot empty; products are placed afterwards
    /// in position order via [`Assignment::place`].
    pub fn empty(num_markets: usize) -> Self {
        assert!(
            num_markets > SELL_START_INDEX,
            "no sellable markets: market count {} does not exceed the reserved range {}",
            num_markets,
            SELL_START_INDEX
        );
        Assignment {
            slots: vec![Vec::new(); num_markets - SELL_START_INDEX],
            product_market: Vec::new(),
        }
    }

    /// Append the next product position to `market`'s slot. Products must be
    /// placed in position order (0, 1, 2, ...), as the greedy seed does.
    pub fn place(&mut self, market: usize) {
        let product = self.product_market.len();
        self.slots[market - SELL_START_INDEX].push(product);
        self.product_market.push(market);
    }

    pub fn num_products(&self) -> usize {
        self.product_market.len()
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Market currently holding `product`.
    pub fn market_of(&self, product: usize) -> usize {
        self.product_market[product]
    }

    pub fn products_at(&self, market: usize) -> &[usize] {
        &self.slots[market - SELL_START_INDEX]
    }

    /// Slots in ascending market-index order, the traversal order the
    /// fitness walk and the display layer both use.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.slots
            .iter()
            .enumerate()
            .map(|(offset, items)| (SELL_START_INDEX + offset, items.as_slice()))
    }

    /// Move `product` to `target` market. The product is removed from its
    /// current slot and appended to the target's slot, so moving a product
    /// onto its own market still shifts it to the end of the list; that
    /// no-op perturbation is allowed.
    pub fn transfer(&mut self, product: usize, target: usize) {
        let source = self.product_market[product];
        let slot = &mut self.slots[source - SELL_START_INDEX];
        let pos = slot
            .iter()
            .position(|&p| p == product)
            .expect("reverse index out of sync with slots");
        slot.remove(pos);

        self.slots[target - SELL_START_INDEX].push(product);
        self.product_market[product] = target;
    }
}
