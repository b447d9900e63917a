use argslot::Targets;

#[derive(Targets)]
struct Unit;

fn main() {}
