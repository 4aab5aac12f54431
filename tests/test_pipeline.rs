//! End-to-end tests for the attention pipeline
//!
//! Covers determinism, embedding independence from position, row-stochastic
//! weights, causal masking, shapes, score scaling and the concrete scenarios
//! a visualizer relies on.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use attention_explorer::config::ExplorerConfig;
use attention_explorer::layers::{
    make_embeddings, make_weights, positional_encoding, token_embedding, HEAD_DIM,
};
use attention_explorer::pipeline::run;
use attention_explorer::tokenizer::MAX_TOKENS;

fn config(text: &str, heads: usize, causal: bool, use_positional: bool, seed: u32) -> ExplorerConfig {
    ExplorerConfig {
        text: text.to_string(),
        heads,
        causal,
        use_positional,
        seed,
    }
}

// ============================================================================
// Determinism
// ============================================================================

mod determinism_tests {
    use super::*;

    #[test]
    fn test_embeddings_bit_identical() {
        let tokens = ["The", "cat", "sat", "on", "the", "mat"];
        for use_positional in [false, true] {
            let a = make_embeddings(&tokens, 12, use_positional);
            let b = make_embeddings(&tokens, 12, use_positional);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_weights_bit_identical() {
        assert_eq!(make_weights(4, 16, HEAD_DIM, 99), make_weights(4, 16, HEAD_DIM, 99));
    }

    #[test]
    fn test_full_run_bit_identical() {
        let cfg = config("The quick brown fox jumps", 3, true, true, 7);
        assert_eq!(run(&cfg), run(&cfg));
    }
}

// ============================================================================
// Embedding Properties
// ============================================================================

mod embedding_tests {
    use super::*;

    #[test]
    fn test_token_row_independent_of_position() {
        let e = make_embeddings(&["cat", "the", "big", "cat"], 8, false);
        let alone = token_embedding("cat", 8);
        assert_eq!(e.row(0), alone.as_slice());
        assert_eq!(e.row(3), alone.as_slice());
    }

    #[test]
    fn test_token_row_independent_of_other_tokens() {
        let a = run(&config("a cat", 2, false, false, 1));
        let b = run(&config("the big cat", 2, false, false, 1));
        assert_eq!(a.embeddings.row(1), b.embeddings.row(2));
    }

    #[test]
    fn test_embedding_scale_is_moderate() {
        let row = token_embedding("scale", 64);
        let mean_sq = row.iter().map(|v| v * v).sum::<f64>() / 64.0;
        // 0.5 × N(0, 1) has variance 0.25
        assert!(mean_sq > 0.05 && mean_sq < 0.6, "mean square was {}", mean_sq);
    }
}

// ============================================================================
// Attention Weight Properties
// ============================================================================

mod weight_property_tests {
    use super::*;

    #[test]
    fn test_rows_sum_to_one() {
        for causal in [false, true] {
            let result = run(&config("one two three four five six seven", 4, causal, true, 21));
            for head in &result.heads {
                for i in 0..head.weights.rows() {
                    let sum: f64 = head.weights.row(i).iter().sum();
                    assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_causal_mask_zeroes_future() {
        let result = run(&config("a b c d e f g h", 3, true, true, 5));
        for head in &result.heads {
            for i in 0..8 {
                for j in (i + 1)..8 {
                    assert_eq!(head.weights.get(i, j), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_non_causal_weights_positive() {
        let result = run(&config("a b c d", 2, false, true, 5));
        for head in &result.heads {
            assert!(head.weights.as_slice().iter().all(|&w| w > 0.0));
        }
    }

    #[test]
    fn test_scores_are_scaled_dot_products() {
        let result = run(&config("The cat sat on the mat", 2, false, true, 1234));
        let scale = (HEAD_DIM as f64).sqrt();
        for head in &result.heads {
            for i in 0..result.seq_len() {
                for j in 0..result.seq_len() {
                    let dot: f64 = head
                        .q
                        .row(i)
                        .iter()
                        .zip(head.k.row(j))
                        .map(|(a, b)| a * b)
                        .sum();
                    assert_relative_eq!(head.scores.get(i, j), dot / scale, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_head_out_is_weighted_sum_of_values() {
        let result = run(&config("x y z", 1, false, false, 3));
        let head = &result.heads[0];
        for i in 0..3 {
            for d in 0..HEAD_DIM {
                let expected: f64 = (0..3).map(|j| head.weights.get(i, j) * head.v.get(j, d)).sum();
                assert_relative_eq!(head.head_out.get(i, d), expected, epsilon = 1e-12);
            }
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

mod shape_tests {
    use super::*;

    #[test]
    fn test_all_shapes() {
        for heads in 1..=4 {
            let result = run(&config("The cat sat on the mat", heads, false, true, 9));
            let t = 6;
            let d_model = heads * HEAD_DIM;
            assert_eq!(result.embeddings.shape(), (t, d_model));
            assert_eq!(result.heads.len(), heads);
            for head in &result.heads {
                assert_eq!(head.q.shape(), (t, HEAD_DIM));
                assert_eq!(head.k.shape(), (t, HEAD_DIM));
                assert_eq!(head.v.shape(), (t, HEAD_DIM));
                assert_eq!(head.scores.shape(), (t, t));
                assert_eq!(head.weights.shape(), (t, t));
                assert_eq!(head.head_out.shape(), (t, HEAD_DIM));
            }
            assert_eq!(result.concat.shape(), (t, heads * HEAD_DIM));
            assert_eq!(result.output.shape(), (t, d_model));
            assert_eq!(result.weights.wo.shape(), (heads * HEAD_DIM, d_model));
        }
    }

    #[test]
    fn test_concat_columns_come_from_heads() {
        let result = run(&config("alpha beta gamma", 3, false, true, 11));
        for (h, head) in result.heads.iter().enumerate() {
            for t in 0..3 {
                assert_eq!(&result.concat.row(t)[h * HEAD_DIM..(h + 1) * HEAD_DIM], head.head_out.row(t));
            }
        }
    }
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_the_cat_sat_single_head() {
        let cfg = config("The cat sat", 1, false, false, 1234);
        let result = run(&cfg);

        assert_eq!(result.tokens, vec!["The", "cat", "sat"]);
        assert_eq!(result.d_model(), 4);
        let weights = &result.heads[0].weights;
        assert_eq!(weights.shape(), (3, 3));
        for i in 0..3 {
            let sum: f64 = weights.row(i).iter().sum();
            assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-6);
        }
        assert_eq!(run(&cfg).output, result.output);
    }

    #[test]
    fn test_the_cat_sat_causal_first_row() {
        let result = run(&config("The cat sat", 1, true, false, 1234));
        assert_eq!(result.heads[0].weights.row(0), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_text() {
        let result = run(&config("", 2, true, true, 1234));
        assert!(result.tokens.is_empty());
        assert!(result.embeddings.is_empty());
        assert!(result.concat.is_empty());
        assert!(result.output.is_empty());
        for head in &result.heads {
            assert!(head.weights.is_empty());
            assert!(head.head_out.is_empty());
        }
    }

    #[test]
    fn test_eighteen_words_truncated() {
        let result = run(&config("a b c d e f g h i j k l m n o p q r", 1, false, true, 1));
        assert_eq!(result.seq_len(), MAX_TOKENS);
        assert_eq!(result.seq_len(), 16);
        assert_eq!(result.heads[0].weights.shape(), (16, 16));
    }

    #[test]
    fn test_positional_toggle_adds_encoding() {
        let without = run(&config("The cat sat on the mat", 2, false, false, 1234));
        let with = run(&config("The cat sat on the mat", 2, false, true, 1234));
        let pe = positional_encoding(6, 8);
        for t in 0..6 {
            for d in 0..8 {
                let diff = with.embeddings.get(t, d) - without.embeddings.get(t, d);
                assert_abs_diff_eq!(diff, pe.get(t, d), epsilon = 1e-12);
            }
        }
        assert_eq!(with.positional.as_ref(), Some(&pe));
    }

    #[test]
    fn test_randomize_changes_weights_not_embeddings() {
        let cfg = config("The cat sat", 2, false, true, 1234);
        let before = run(&cfg);
        let after = run(&cfg.randomized());

        assert_eq!(before.embeddings, after.embeddings);
        assert_ne!(before.weights.heads[0].wq, after.weights.heads[0].wq);
        assert_ne!(before.weights.wo, after.weights.wo);
        assert_ne!(before.output, after.output);
    }

    #[test]
    fn test_text_change_keeps_weights() {
        let a = run(&config("The cat sat", 2, false, true, 1234));
        let b = run(&config("A dog ran far", 2, false, true, 1234));
        assert_eq!(a.weights, b.weights);
        assert_ne!(a.embeddings.row(0), b.embeddings.row(0));
    }

    #[test]
    fn test_serializes_to_json_arrays() {
        let result = run(&config("hi there", 1, false, false, 1));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["tokens"][1], "there");
        assert_eq!(json["embeddings"].as_array().unwrap().len(), 2);
        assert_eq!(json["heads"][0]["weights"][0].as_array().unwrap().len(), 2);
        assert!(json["positional"].is_null());
    }
}
