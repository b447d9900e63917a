use argslot::{Targets, TargetShape};

#[derive(Targets)]
#[allow(dead_code)]
struct Window<'a, T: Clone>
where
    T: Default,
{
    title: &'a str,
    sizes: Vec<T>,
    anchor: Option<T>,
    depth: u8,
}

fn main() {
    let targets = Window::<'static, u32>::targets();
    assert_eq!(targets.len(), 4);
    assert_eq!(targets[1].shape, TargetShape::Sequence { whole: None, element: None });
    assert_eq!(targets[2].shape, TargetShape::Opaque);
    assert!(targets[2].nullable);
}
