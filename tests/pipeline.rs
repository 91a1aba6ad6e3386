use mandelgrid::{
    codec, generate, map_counts, to_intensity, Complex, Engine, Error, Execution, GridConfig,
    IntensityMap, Region,
};

fn reference(rows: usize, cols: usize) -> GridConfig {
    GridConfig::new(Region::new(-2.0, -2.0, 4.0, 4.0), rows, cols, 100, 2.0)
}

#[test]
fn three_by_three_end_to_end() {
    let grid = generate(&reference(3, 3)).unwrap();
    assert_eq!(grid.as_slice(), &[1, 1, 1, 1, 100, 1, 1, 1, 1]);

    let pixels = to_intensity(&grid, 100);
    assert_eq!(
        pixels.as_slice(),
        &[65534, 65534, 65534, 65534, 0, 65534, 65534, 65534, 65534]
    );
}

#[test]
fn origin_cell_reaches_the_cap_at_any_odd_resolution() {
    for n in [3, 5, 9, 17] {
        let grid = generate(&reference(n, n)).unwrap();
        assert_eq!(grid.get(n / 2, n / 2), Some(100), "n = {n}");
    }
}

#[test]
fn generated_grid_survives_text_round_trip() {
    let config = GridConfig::new(Region::new(-2.2, -1.4, 3.0, 2.8), 24, 37, 300, 2.0);
    let grid = generate(&config).unwrap();
    assert_eq!(codec::deserialize(&codec::serialize(&grid)).unwrap(), grid);
}

#[test]
fn grid_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.txt");
    let grid = generate(&reference(16, 12)).unwrap();

    codec::write_grid(&path, &grid).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("16\n12\n"));
    assert_eq!(text.lines().count(), 18);
    assert_eq!(codec::read_grid(&path).unwrap(), grid);
}

#[test]
fn missing_grid_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = codec::read_grid(&dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn png_export_keeps_sixteen_bit_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("render.png");
    let grid = generate(&reference(5, 7)).unwrap();
    let pixels = to_intensity(&grid, 100);
    pixels.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().into_luma16();
    assert_eq!(img.dimensions(), (7, 5));
    for row in 0..5 {
        for col in 0..7 {
            assert_eq!(
                img.get_pixel(col as u32, row as u32).0[0],
                pixels.get(row, col).unwrap()
            );
        }
    }
}

#[test]
fn config_files_drive_generation() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("request.json");
    let toml = dir.path().join("request.toml");
    let config = reference(9, 11).with_execution(Execution::Sequential);

    config.save(&json).unwrap();
    config.save(&toml).unwrap();
    assert_eq!(GridConfig::load(&json).unwrap(), config);
    assert_eq!(GridConfig::load(&toml).unwrap(), config);

    let from_file = generate(&GridConfig::load(&toml).unwrap()).unwrap();
    assert_eq!(from_file, generate(&config).unwrap());
}

#[test]
fn unparseable_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.cfg");
    std::fs::write(&path, "rows = [").unwrap();
    assert!(matches!(GridConfig::load(&path), Err(Error::Config(_))));
}

#[test]
fn generation_is_deterministic() {
    let engine = Engine::new(reference(31, 29)).unwrap();
    assert_eq!(engine.generate().unwrap(), engine.generate().unwrap());
}

#[test]
fn loaded_grid_renders_like_fresh_one() {
    let grid = generate(&reference(6, 6)).unwrap();
    let loaded = codec::deserialize(&codec::serialize(&grid)).unwrap();
    let direct = map_counts(6, 6, grid.as_slice(), 100, IntensityMap::Inverted).unwrap();
    assert_eq!(to_intensity(&loaded, 100), direct);
}

#[test]
fn escape_at_c_ten_ten_is_immediate() {
    assert_eq!(mandelgrid::escape_time(Complex::new(10.0, 10.0), 100, 2.0), 1);
}
