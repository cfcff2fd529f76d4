#![no_main]

use arbitrary::Arbitrary;
use quadfit::Point;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|setup: Setup| {
    let Ok(transform) = quadfit::compute_affine_transform(setup.source, setup.target) else {
        return;
    };
    assert!(
        transform.is_finite(),
        "fit produced {transform} from {setup:?}"
    );
});

#[derive(Debug, Arbitrary)]
struct Setup {
    source: [Point; 4],
    target: [Point; 4],
}
