use astromap::angles::{cos_deg, normalize_signed, sin_deg};
use astromap::astrocartography::{
    project_lines, LineProjector, LineSampler, LineType, ProjectionSettings,
};
use astromap::chart::{build_chart, BirthData, BirthLocation, FullChart};
use astromap::ephemeris::time::gmst_degrees;
use astromap::ephemeris::{
    ecliptic_to_equatorial, horizon_hour_angle, mean_obliquity, EquatorialPosition,
    HorizonCrossing, Planet,
};
use astromap::places::great_circle_km;

fn chart() -> FullChart {
    let birth = BirthData::parse(
        "1979-02-26",
        Some("16:45"),
        None,
        BirthLocation::new("Winnipeg", 49.8951, -97.1384, "America/Winnipeg"),
    )
    .unwrap();
    build_chart(&birth).unwrap()
}

fn body(chart: &FullChart, planet: Planet) -> EquatorialPosition {
    let pos = chart.position(planet).unwrap();
    ecliptic_to_equatorial(pos.longitude, pos.latitude, mean_obliquity(chart.julian_day))
}

#[test]
fn test_line_inventory() {
    let chart = chart();
    let projection = project_lines(&chart);

    // 10 planets × 4 + 2 nodes × 2
    assert!(projection.lines.len() + projection.diagnostics.len() <= 44);
    for planet in Planet::all() {
        assert!(projection.line(*planet, LineType::Mc).is_some(), "{planet} MC");
        assert!(projection.line(*planet, LineType::Ic).is_some(), "{planet} IC");
    }
    assert!(projection.lines_for(Planet::SouthNode).all(|l| l.line_type.is_meridian()));
    assert!(projection.line(Planet::Venus, LineType::Ac).is_some());
    assert!(projection.line(Planet::Venus, LineType::Dc).is_some());
}

#[test]
fn test_mc_line_is_where_the_planet_culminates() {
    let chart = chart();
    let projection = project_lines(&chart);
    let gmst = gmst_degrees(chart.julian_day);

    for planet in [Planet::Sun, Planet::Mars, Planet::Pluto] {
        let eq = body(&chart, planet);
        let mc = projection.line(planet, LineType::Mc).unwrap();
        let ic = projection.line(planet, LineType::Ic).unwrap();
        for v in mc.vertices() {
            let hour_angle = normalize_signed(gmst + v.lng - eq.right_ascension);
            assert!(hour_angle.abs() < 1e-9, "{planet} MC hour angle {hour_angle}");
        }
        for v in ic.vertices() {
            let hour_angle = normalize_signed(gmst + v.lng - eq.right_ascension);
            assert!(
                (hour_angle.abs() - 180.0).abs() < 1e-9,
                "{planet} IC hour angle {hour_angle}"
            );
        }
        // Vertical: one longitude for the whole line
        let first = mc.vertices().next().unwrap().lng;
        assert!(mc.vertices().all(|v| v.lng == first));
        assert!(!mc.has_gaps());
    }
}

#[test]
fn test_ac_dc_vertices_are_on_the_horizon() {
    let chart = chart();
    let projection = project_lines(&chart);
    let gmst = gmst_degrees(chart.julian_day);

    for planet in [Planet::Moon, Planet::Jupiter, Planet::Neptune] {
        let eq = body(&chart, planet);
        for line_type in [LineType::Ac, LineType::Dc] {
            let line = projection.line(planet, line_type).unwrap();
            assert!(line.vertex_count() > 0);
            for v in line.vertices() {
                let h = gmst + v.lng - eq.right_ascension;
                let sin_alt = sin_deg(v.lat) * sin_deg(eq.declination)
                    + cos_deg(v.lat) * cos_deg(eq.declination) * cos_deg(h);
                assert!(sin_alt.abs() < 1e-9, "{planet} {line_type} {v:?}");
                assert!(v.lat.abs() <= 85.0);
                // Rising bodies are east of the meridian, setting ones west
                match line_type {
                    LineType::Ac => assert!(sin_deg(h) < 1e-9),
                    _ => assert!(sin_deg(h) > -1e-9),
                }
            }
        }
    }
}

#[test]
fn test_circumpolar_latitudes_have_no_vertices() {
    // tan(80°)·tan(20°) ≈ 2.06: no horizon crossing at 80° latitude
    assert_eq!(horizon_hour_angle(80.0, 20.0), HorizonCrossing::NeverSets);

    let settings = ProjectionSettings::default();
    let northern = EquatorialPosition {
        right_ascension: 30.0,
        declination: 20.0,
    };
    for line_type in [LineType::Ac, LineType::Dc] {
        let samples: Vec<_> = LineSampler::new(line_type, northern, 100.0, &settings).collect();
        // The horizon circle turns back at 70°: nothing to cut off
        assert!(samples.iter().all(Option::is_some));
        assert!(samples.iter().flatten().all(|v| v.lat.abs() <= 70.0 + 1e-9));
        // Between the turning points the body rises and sets normally
        for vertex in samples[1..samples.len() - 1].iter().flatten() {
            assert!(matches!(
                horizon_hour_angle(vertex.lat, northern.declination),
                HorizonCrossing::Crosses { .. }
            ));
        }
    }

    // A body near the equator: the line runs toward the poles and the
    // stretch past 85° becomes a gap rather than NaN vertices.
    let near_equator = EquatorialPosition {
        right_ascension: 30.0,
        declination: 0.8,
    };
    let samples: Vec<_> = LineSampler::new(LineType::Ac, near_equator, 100.0, &settings).collect();
    assert_eq!(samples.len(), 181);
    let gaps = samples.iter().filter(|s| s.is_none()).count();
    assert!(gaps > 0);
    for vertex in samples.iter().flatten() {
        assert!(vertex.lat.is_finite() && vertex.lng.is_finite());
        assert!(vertex.lat.abs() <= settings.max_latitude);
    }
}

#[test]
fn test_steep_lines_have_no_kinks() {
    // δ = 0.4°: the line is nearly a meridian, yet vertices stay a step apart
    let settings = ProjectionSettings::default();
    let body = EquatorialPosition {
        right_ascension: 0.0,
        declination: 0.4,
    };
    let vertices: Vec<_> = LineSampler::new(LineType::Ac, body, 0.0, &settings).flatten().collect();
    assert!(vertices.len() > 160);
    for pair in vertices.windows(2) {
        assert!((pair[0].lat - pair[1].lat).abs() <= 1.0 + 1e-9, "{pair:?}");
        assert!(great_circle_km(pair[0], pair[1]) < 112.0);
    }
}

#[test]
fn test_vertices_span_the_globe() {
    let projection = project_lines(&chart());
    let sun_ac = projection.line(Planet::Sun, LineType::Ac).unwrap();
    let sun_dc = projection.line(Planet::Sun, LineType::Dc).unwrap();
    let mut covered = [false; 36];
    for v in sun_ac.vertices().chain(sun_dc.vertices()) {
        assert!((-180.0..=180.0).contains(&v.lng));
        covered[(((v.lng + 180.0) / 10.0) as usize).min(35)] = true;
    }
    // Rising and setting together reach every longitude
    assert!(covered.iter().all(|&c| c), "{covered:?}");
}

#[test]
fn test_segments_never_jump_across_the_map() {
    let projection = project_lines(&chart());
    for line in &projection.lines {
        for segment in &line.segments {
            for pair in segment.windows(2) {
                assert!(
                    (pair[0].lng - pair[1].lng).abs() <= 180.0,
                    "{} {} {pair:?}",
                    line.planet,
                    line.line_type
                );
            }
        }
    }
}

#[test]
fn test_projection_is_deterministic() {
    let chart = chart();
    let parallel = project_lines(&chart);
    let serial = LineProjector::new(ProjectionSettings {
        parallel: false,
        ..ProjectionSettings::default()
    })
    .unwrap()
    .project(&chart);
    assert_eq!(parallel, serial);
    assert_eq!(project_lines(&chart), parallel);
}

#[cfg(feature = "parallel")]
#[test]
fn test_projection_independent_of_thread_count() {
    let chart = chart();
    let run = |threads: usize| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
            .install(|| project_lines(&chart))
    };
    assert_eq!(run(1), run(4));
}

#[test]
fn test_coarser_steps_mean_fewer_vertices() {
    let chart = chart();
    let fine = project_lines(&chart);
    let coarse = LineProjector::new(ProjectionSettings {
        step_deg: 5.0,
        ..ProjectionSettings::default()
    })
    .unwrap()
    .project(&chart);
    let count = |p: &astromap::astrocartography::LineProjection| {
        p.lines.iter().map(|l| l.vertex_count()).sum::<usize>()
    };
    assert!(count(&coarse) < count(&fine));
}
