//! Shape laws for the hidden-state helpers.

use candle_core::{Device, Tensor};
use metalign::tensor::{drop_auxiliary_dimensions, flatten_last_two_axes, normalize_vectors};
use metalign::Error;
use proptest::prelude::*;

fn filled(shape: &[usize]) -> Tensor {
    let n: usize = shape.iter().product();
    let data: Vec<f32> = (0..n).map(|i| (i % 7) as f32 + 1.0).collect();
    Tensor::from_vec(data, shape, &Device::Cpu).unwrap()
}

proptest! {
    #[test]
    fn drop_shortens_by_three(len in 3usize..24, hidden in 1usize..6, heads in 1usize..3) {
        let out = drop_auxiliary_dimensions(&filled(&[1, len, heads, hidden])).unwrap();
        prop_assert_eq!(out.dims(), &[len - 3, heads, hidden][..]);
    }

    #[test]
    fn flatten_preserves_elements(a in 1usize..4, b in 1usize..4, c in 1usize..6, d in 1usize..6) {
        let input = filled(&[a, b, c, d]);
        let out = flatten_last_two_axes(&input).unwrap();
        prop_assert_eq!(out.dims(), &[a, b, c * d][..]);
        prop_assert_eq!(out.elem_count(), input.elem_count());
        prop_assert_eq!(
            out.flatten_all().unwrap().to_vec1::<f32>().unwrap(),
            input.flatten_all().unwrap().to_vec1::<f32>().unwrap()
        );
    }

    #[test]
    fn normalized_vectors_have_unit_norm(rows in 1usize..8, dim in 1usize..16) {
        let out = normalize_vectors(&filled(&[rows, dim])).unwrap();
        for row in out.to_vec2::<f32>().unwrap() {
            let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
            prop_assert!((norm - 1.0).abs() < 1e-4, "norm {}", norm);
        }
    }
}

#[test]
fn drop_matches_interior_positions() {
    // positions 0..6; keep 1..4
    let out = drop_auxiliary_dimensions(&filled(&[1, 6, 1])).unwrap();
    let expected = filled(&[6, 1]).narrow(0, 1, 3).unwrap();
    assert_eq!(
        out.flatten_all().unwrap().to_vec1::<f32>().unwrap(),
        expected.flatten_all().unwrap().to_vec1::<f32>().unwrap()
    );
}

#[test]
fn drop_rejects_batches() {
    assert!(matches!(
        drop_auxiliary_dimensions(&filled(&[2, 6, 4])),
        Err(Error::Precondition(_))
    ));
}

#[test]
fn normalize_broadcasts_over_leading_axes() {
    let out = normalize_vectors(&filled(&[2, 3, 4])).unwrap();
    assert_eq!(out.dims(), &[2, 3, 4]);
}

#[test]
fn normalize_scalar_rejected() {
    let scalar = Tensor::new(3f32, &Device::Cpu).unwrap();
    assert!(matches!(
        normalize_vectors(&scalar),
        Err(Error::Precondition(_))
    ));
}
