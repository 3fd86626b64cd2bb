pub mod constant {
    /// Population size; one employed bee per food source.
    pub const NUM_EMPLOYED_BEES: usize = 5;
    /// Extra roulette-wheel draws per cycle.
    pub const NUM_ONLOOKER_BEES: usize = 5;
    /// Fixed number of optimization cycles per solve.
    pub const MAX_CYCLES: usize = 100;
    /// Consecutive non-improving attempts before a member is reseeded.
    pub const SCOUT_LIMIT: usize = 20;
    /// Markets below this index are starting locations, never sale destinations.
    pub const SELL_START_INDEX: usize = 3;

    /// Flat fitness penalty per distinct market visited.
    pub const MARKET_VISIT_PENALTY: f64 = 0.05;
    /// Guards the fitness inversion against a zero total cost.
    pub const FITNESS_EPSILON: f64 = 1e-6;
    /// Raw prices within this absolute gap of the minimum count as tied.
    pub const PRICE_TIE_TOLERANCE: f64 = 0.01;

    pub const DEFAULT_DATA_DIR: &str = "data";
    pub const MARKET_NAMES_FILE: &str = "market_names.txt";
    pub const DISTANCES_FILE: &str = "distances.csv";
    pub const PRICES_FILE: &str = "prices.csv";
}
