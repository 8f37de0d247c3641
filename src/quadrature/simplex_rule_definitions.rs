//! Symmetric quadrature rules on the reference triangle.
//!
//! Points are stored as consecutive `(xi, eta)` pairs. Weights are scaled to
//! sum to the area of the reference triangle. Rules with more than one point
//! are the symmetric rules of D. A. Dunavant, "High degree efficient symmetrical
//! Gaussian quadrature rules for the triangle" (1985).
use std::collections::HashMap;

lazy_static! {
    /// Map from number of points to (order, points, weights)
    pub static ref TRIANGLE_RULE_DEFINITIONS: HashMap<usize, (usize, Vec<f64>, Vec<f64>)> = {
        let mut m = HashMap::new();
        m.insert(
            1,
            (
                1,
                vec![
                    0.3333333333333333, 0.3333333333333333,
                ],
                vec![
                    0.5,
                ],
            ),
        );
        m.insert(
            3,
            (
                2,
                vec![
                    0.16666666666666666, 0.16666666666666666,
                    0.6666666666666666, 0.16666666666666666,
                    0.16666666666666666, 0.6666666666666666,
                ],
                vec![
                    0.16666666666666666,
                    0.16666666666666666,
                    0.16666666666666666,
                ],
            ),
        );
        m.insert(
            4,
            (
                3,
                vec![
                    0.3333333333333333, 0.3333333333333333,
                    0.6, 0.2,
                    0.2, 0.6,
                    0.2, 0.2,
                ],
                vec![
                    -0.28125,
                    0.2604166666666667,
                    0.2604166666666667,
                    0.2604166666666667,
                ],
            ),
        );
        m.insert(
            6,
            (
                4,
                vec![
                    0.4459484909159649, 0.4459484909159649,
                    0.10810301816807022, 0.4459484909159649,
                    0.4459484909159649, 0.10810301816807022,
                    0.09157621350977074, 0.09157621350977074,
                    0.8168475729804585, 0.09157621350977074,
                    0.09157621350977074, 0.8168475729804585,
                ],
                vec![
                    0.11169079483900574,
                    0.11169079483900574,
                    0.11169079483900574,
                    0.054975871827660935,
                    0.054975871827660935,
                    0.054975871827660935,
                ],
            ),
        );
        m.insert(
            7,
            (
                5,
                vec![
                    0.3333333333333333, 0.3333333333333333,
                    0.47014206410511505, 0.47014206410511505,
                    0.05971587178976989, 0.47014206410511505,
                    0.47014206410511505, 0.05971587178976989,
                    0.10128650732345633, 0.10128650732345633,
                    0.7974269853530873, 0.10128650732345633,
                    0.10128650732345633, 0.7974269853530873,
                ],
                vec![
                    0.1125,
                    0.06619707639425308,
                    0.06619707639425308,
                    0.06619707639425308,
                    0.06296959027241358,
                    0.06296959027241358,
                    0.06296959027241358,
                ],
            ),
        );
        m.insert(
            12,
            (
                6,
                vec![
                    0.06308901449150223, 0.06308901449150223,
                    0.8738219710169955, 0.06308901449150223,
                    0.06308901449150223, 0.8738219710169955,
                    0.24928674517091043, 0.24928674517091043,
                    0.5014265096581791, 0.24928674517091043,
                    0.24928674517091043, 0.5014265096581791,
                    0.053145049844816945, 0.3103524510337844,
                    0.3103524510337844, 0.053145049844816945,
                    0.053145049844816945, 0.6365024991213987,
                    0.6365024991213987, 0.053145049844816945,
                    0.3103524510337844, 0.6365024991213987,
                    0.6365024991213987, 0.3103524510337844,
                ],
                vec![
                    0.02542245318510341,
                    0.02542245318510341,
                    0.02542245318510341,
                    0.058393137863189684,
                    0.058393137863189684,
                    0.058393137863189684,
                    0.041425537809186785,
                    0.041425537809186785,
                    0.041425537809186785,
                    0.041425537809186785,
                    0.041425537809186785,
                    0.041425537809186785,
                ],
            ),
        );
        m
    };
}
