use sable::uci;

fn main() {
    uci::run();
}
