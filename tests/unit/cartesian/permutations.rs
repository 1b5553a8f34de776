//! Tests for the cartesian broadcast operator

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2, ArrayD, IxDyn, arr0, s};
    use neuroview::cartesian::permutations::{all_permutations_equal, all_permutations_operation};
    use neuroview::cartesian::{Addition, Subtraction};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Tests addition of ones(2,2) against identity(2)
    // Verified by broadcasting rhs along the trailing axes instead
    #[test]
    fn test_add_ones_identity() {
        let ones = Array2::<i32>::ones((2, 2));
        let identity = Array2::<i32>::eye(2);

        let result = all_permutations_operation(Addition, &ones, &identity).unwrap();

        assert_eq!(result.shape(), &[2, 2, 2, 2]);
        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    for l in 0..2 {
                        let expected = if k == l { 2 } else { 1 };
                        assert_eq!(result[[i, j, k, l]], expected);
                    }
                }
            }
        }
    }

    // Tests the element law against random operands
    // Verified by swapping the operand order in the expansion
    #[test]
    fn test_element_law_random() {
        let mut rng = StdRng::seed_from_u64(7);
        let lhs = Array2::from_shape_fn((3, 2), |_| rng.random_range(-50..50));
        let rhs = Array1::from_shape_fn(4, |_| rng.random_range(-50..50));

        let result = all_permutations_operation(Subtraction, &lhs, &rhs).unwrap();

        assert_eq!(result.shape(), &[3, 2, 4]);
        for ((i, j), &a) in lhs.indexed_iter() {
            for (k, &b) in rhs.indexed_iter() {
                assert_eq!(result[[i, j, k]], a - b);
            }
        }
    }

    // Tests equality masks between a label list and an image
    // Verified by comparing against the first label only
    #[test]
    fn test_equal_masks() {
        let labels = vec![1_u16, 4];
        let image = Array1::from(vec![0_u16, 1, 4, 4, 2]);

        let masks = all_permutations_equal(&labels, &image).unwrap();

        assert_eq!(masks.shape(), &[2, 5]);
        assert_eq!(
            masks.iter().copied().collect::<Vec<_>>(),
            vec![
                false, true, false, false, false, //
                false, false, true, true, false,
            ]
        );
    }

    // Tests that operand element types may differ
    // Verified by requiring identical element types
    #[test]
    fn test_mixed_element_types() {
        let words = vec!["a".to_string(), "bb".to_string()];
        let lengths = vec![1_usize, 2, 3];

        let result = all_permutations_operation(
            |word: &String, len: &usize| word.len() == *len,
            &words,
            &lengths,
        )
        .unwrap();

        assert_eq!(result.shape(), &[2, 3]);
        assert_eq!(
            result.iter().copied().collect::<Vec<_>>(),
            vec![true, false, false, false, true, false]
        );
    }

    // Tests that an empty operand gives an empty result of the combined shape
    // Verified by skipping expansion for empty operands
    #[test]
    fn test_empty_operand() {
        let lhs: Vec<i32> = Vec::new();
        let rhs = Array2::<i32>::ones((2, 3));

        let result = all_permutations_operation(Addition, &lhs, &rhs).unwrap();

        assert_eq!(result.shape(), &[0, 2, 3]);
        assert!(result.is_empty());
    }

    // Tests that a 0-d operand contributes no axes
    // Verified by treating 0-d operands as length-1 vectors
    #[test]
    fn test_scalar_operand() {
        let scalar = arr0(10);
        let rhs = vec![1, 2, 3];

        let result = all_permutations_operation(Addition, &scalar, &rhs).unwrap();
        assert_eq!(result, ArrayD::from_shape_vec(IxDyn(&[3]), vec![11, 12, 13]).unwrap());

        let both = all_permutations_operation(Addition, &scalar, &scalar).unwrap();
        assert_eq!(both.shape(), &[] as &[usize]);
        assert_eq!(both.iter().next(), Some(&20));
    }

    // Tests the element law on a column and a stepped slice
    // Verified by rejecting operands that are not one block of memory
    #[test]
    fn test_non_contiguous_operands() {
        let array = Array2::from_shape_vec((4, 4), (0..16).collect()).unwrap();
        let column = array.column(1);
        let offsets = [10, 20];

        let result = all_permutations_operation(Addition, &column, &offsets[..]).unwrap();
        assert_eq!(result.shape(), &[4, 2]);
        for (i, &a) in column.indexed_iter() {
            for (k, &b) in offsets.iter().enumerate() {
                assert_eq!(result[[i, k]], a + b);
            }
        }

        let stepped = array.slice(s![.., ..;2]);
        let masks = all_permutations_equal(&stepped, &vec![2, 5]).unwrap();
        assert_eq!(masks.shape(), &[4, 2, 2]);
        for ((i, j), &a) in stepped.indexed_iter() {
            assert_eq!(masks[[i, j, 0]], a == 2);
            assert_eq!(masks[[i, j, 1]], a == 5);
        }
    }
}
