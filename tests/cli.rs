use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sds() -> Command {
    let mut cmd = Command::cargo_bin("sds").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("PAGER");
    cmd
}

fn sds_dump() -> Command {
    let mut cmd = Command::cargo_bin("sds-dump").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A file that exists but is not netCDF.
fn not_netcdf(dir: &TempDir) -> String {
    let path = dir.path().join("garbage.nc");
    fs::write(&path, b"this is not a netCDF file\n").unwrap();
    path.to_string_lossy().into_owned()
}

/// time=4 (coordinate), lat=3, an int16 `temp(time, lat)` holding 0..12
/// and a string variable.
fn ocean(dir: &TempDir) -> String {
    let path = dir.path().join("ocean.nc");
    let mut file = netcdf::create(&path).unwrap();
    file.add_dimension("time", 4).unwrap();
    file.add_dimension("lat", 3).unwrap();
    file.add_attribute("title", "test ocean").unwrap();

    let mut time = file.add_variable::<f64>("time", &["time"]).unwrap();
    time.put_values(&[0.0, 1.5, 3.0, 4.5], ..).unwrap();

    let mut temp = file.add_variable::<i16>("temp", &["time", "lat"]).unwrap();
    temp.put_attribute("units", "K").unwrap();
    let cells: Vec<i16> = (0..12).collect();
    temp.put_values(&cells, ..).unwrap();

    file.add_string_variable("station", &["lat"]).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn dispatcher_without_command_prints_usage() {
    sds()
        .assert()
        .code(255)
        .stderr(predicate::str::contains("Usage: sds COMMAND ARG..."));
}

#[test]
fn dispatcher_rejects_unknown_command() {
    sds()
        .arg("frobnicate")
        .assert()
        .code(255)
        .stderr(predicate::str::contains("Invalid command 'frobnicate'"))
        .stderr(predicate::str::contains("Usage: sds COMMAND ARG..."));
}

#[test]
fn dispatcher_propagates_sub_tool_status() {
    sds()
        .args(["dump", "/nonexistent/data.nc"])
        .assert()
        .code(254)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "/nonexistent/data.nc: error opening file",
        ));
}

#[test]
fn dispatcher_relays_range_errors() {
    sds()
        .args(["dump", "-v", "temp[5:2]", "/nonexistent/data.nc"])
        .assert()
        .code(255)
        .stderr(predicate::str::contains("in temp[5:2]"))
        .stderr(predicate::str::contains(
            "parse error: start of range must be less than or equal to end",
        ));
}

#[test]
fn dispatcher_writes_log_file() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("sds.log");

    sds()
        .arg("--log")
        .arg(&log)
        .args(["dump", "/nonexistent/data.nc"])
        .assert()
        .code(254);

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("launched"));
    assert!(text.contains("sds-dump"));
}

#[test]
fn dump_requires_input_file() {
    sds_dump()
        .assert()
        .code(255)
        .stderr(predicate::str::starts_with(
            "sds-dump: you need to specify an input file",
        ));
}

#[test]
fn dump_rejects_zero_in_one_based_range() {
    sds_dump()
        .args(["-v", "x(0:5)", "/nonexistent/data.nc"])
        .assert()
        .code(255)
        .stderr(predicate::str::contains("in x(0:5)\n     ^\n"))
        .stderr(predicate::str::contains(
            "parse error: cannot start indexes with 0",
        ));
}

#[test]
fn dump_reports_unreadable_file() {
    let dir = TempDir::new().unwrap();
    let path = not_netcdf(&dir);

    sds_dump()
        .arg(&path)
        .assert()
        .code(254)
        .stderr(predicate::str::contains("error opening file"));
}

#[test]
fn optional_flag_value_does_not_swallow_input_file() {
    let dir = TempDir::new().unwrap();
    let path = not_netcdf(&dir);

    // -la takes an optional variable name; an existing file is the input
    sds_dump()
        .args(["-la", &path])
        .assert()
        .code(254)
        .stderr(predicate::str::contains(format!(
            "{}: error opening file",
            path
        )));
}

#[test]
fn output_modes_are_exclusive() {
    sds_dump()
        .args(["-lv", "-v", "temp", "x.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn dump_prints_sliced_values() {
    let dir = TempDir::new().unwrap();
    let path = ocean(&dir);

    sds_dump()
        .args(["-v", "temp[1:2][0:1]", &path])
        .assert()
        .success()
        .stdout("3 4 6 7 \n");

    sds_dump()
        .args(["-v", "temp(2:3,4)", &path])
        .assert()
        .success()
        .stdout("10 11 \n");
}

#[test]
fn dump_lists_and_reads_attributes() {
    let dir = TempDir::new().unwrap();
    let path = ocean(&dir);

    sds_dump()
        .args(["-lv", &path])
        .assert()
        .success()
        .stdout("time temp station \n");

    sds_dump()
        .args(["-a", "temp@units", &path])
        .assert()
        .success()
        .stdout("\"K\"\n");

    sds_dump()
        .args(["-d", &path])
        .assert()
        .success()
        .stdout("4 3 \n");
}

#[test]
fn dump_summary_of_real_file() {
    let dir = TempDir::new().unwrap();
    let path = ocean(&dir);

    sds_dump()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("netCDF format"))
        .stdout(predicate::str::contains("double time(time=4) (coordinate)"))
        .stdout(predicate::str::contains("int16 temp(lat=3,time=4)"))
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn dump_refuses_string_values() {
    let dir = TempDir::new().unwrap();
    let path = ocean(&dir);

    sds_dump()
        .args(["-v", "station", &path])
        .assert()
        .code(255)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "variable 'station' has type string, which has no printable values",
        ));
}

#[test]
fn dispatcher_relays_values_unpaged() {
    let dir = TempDir::new().unwrap();
    let path = ocean(&dir);

    sds()
        .args(["dump", "-v", "time", &path])
        .assert()
        .success()
        .stdout("0 1.5 3 4.5\n");
}

#[test]
fn dispatcher_passes_flags_after_command_through() {
    let dir = TempDir::new().unwrap();
    let path = ocean(&dir);
    let log = dir.path().join("dump.log");

    // --log after the command belongs to sds-dump, not the dispatcher
    sds()
        .args(["dump", "-lv", "--log"])
        .arg(&log)
        .arg(&path)
        .assert()
        .success()
        .stdout("time temp station \n");
    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("Starting sds-dump"));
    assert!(!text.contains("Starting sds\n"));

    sds()
        .args(["dump", "-h"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumps part or all of INFILE"))
        .stdout(predicate::str::contains("Runs an sds-* sub-tool").not());
}
