pub mod bee_colony;
