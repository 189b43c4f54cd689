fn main() {
    if let Err(err) = build_an_atom::app::start() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
