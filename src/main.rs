fn main() {
    trekplan::app::cli::run();
}
