fn main() -> Result<(), Box<dyn std::error::Error>> {
    nsfill_cli::run()
}
