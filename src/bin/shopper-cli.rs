fn main() -> Result<(), Box<dyn std::error::Error>> {
    shopper::cli::run()
}
