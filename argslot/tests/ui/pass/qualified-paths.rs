use argslot::{Target, Targets};

#[derive(Targets)]
#[allow(dead_code)]
struct Paths {
    files: std::vec::Vec<std::path::PathBuf>,
    queue: std::collections::VecDeque<u16>,
    limit: ::std::option::Option<usize>,
}

fn main() {
    assert_eq!(Paths::target("files"), Some(Target::sequence::<std::path::PathBuf>("files")));
    assert_eq!(Paths::target("limit"), Some(Target::scalar::<usize>("limit").nullable()));
    assert_eq!(Paths::targets()[1].shape.shape(), argslot::Shape::Sequence);
}
