use dmft_gf::{
    affine::i_omega_n,
    greens_functions::{GfBuilder, GfImFreq},
    indices::GfIndices,
};
use dmft_mesher::{MeshImFreq, Statistic};
use ndarray::{Array2, Array3};
use num_complex::Complex64;
use rand::{thread_rng, Rng};

pub fn random_matrix(rows: usize, columns: usize) -> Array2<Complex64> {
    let mut rng = thread_rng();
    Array2::from_shape_simple_fn((rows, columns), || Complex64::new(rng.gen(), rng.gen()))
}

pub fn random_tensor(shape: (usize, usize, usize)) -> Array3<Complex64> {
    let mut rng = thread_rng();
    Array3::from_shape_simple_fn(shape, || Complex64::new(rng.gen(), rng.gen()))
}

/// A random Hermitian matrix, so that `i nu - H` is invertible at every Matsubara frequency
pub fn random_hermitian(dim: usize) -> Array2<Complex64> {
    let matrix = random_matrix(dim, dim);
    let adjoint = matrix.t().mapv(|x| x.conj());
    (matrix + adjoint) * Complex64::new(0.5, 0.)
}

/// A fermionic container on `2 * n_points` frequencies filled with random values
pub fn random_matsubara_gf(beta: f64, n_points: usize, dim: usize) -> GfImFreq {
    GfBuilder::new()
        .with_mesh(MeshImFreq::new(beta, Statistic::Fermion, n_points).expect("valid mesh"))
        .with_data(random_tensor((2 * n_points, dim, dim)))
        .build()
        .expect("consistent fixture")
}

/// The resolvent `(i nu - H)^-1` of a random Hermitian `H`, returned with `H`
pub fn random_resolvent(beta: f64, n_points: usize, dim: usize) -> (GfImFreq, Array2<Complex64>) {
    let hamiltonian = random_hermitian(dim);
    let mut g: GfImFreq = GfBuilder::new()
        .with_mesh(MeshImFreq::new(beta, Statistic::Fermion, n_points).expect("valid mesh"))
        .with_indices(GfIndices::with_default(dim, dim))
        .with_name("G0")
        .build()
        .expect("consistent fixture");
    let resolvent = i_omega_n()
        .sub_matrix(hamiltonian.view())
        .expect("square hamiltonian")
        .inverse();
    g.set_from(&resolvent).expect("invertible at fermionic frequencies");
    (g, hamiltonian)
}
